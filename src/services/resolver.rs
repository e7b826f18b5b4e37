//! 问诊查表
//!
//! 由 (症状, 严重程度, 持续时间) 组合键精确匹配一条固定结果，未命中时返回默认结果。
//! 同一张表带两种语言的文案：印尼语用于应用内表单，英语用于公开 API。
//! 查表是纯函数，没有任何推理；置信度是常数。

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::diagnosis::{
    DiagnosisInput, DiagnosisKey, DiagnosisResult, Duration, Locale, Severity, Symptom,
};

/// 某一语言下的文案
struct Text {
    condition: &'static str,
    description: &'static str,
    first_aid: &'static [&'static str],
}

/// 表项
struct Entry {
    confidence: f64,
    id: Text,
    en: Text,
}

impl Entry {
    fn to_result(&self, locale: Locale) -> DiagnosisResult {
        let text = match locale {
            Locale::Id => &self.id,
            Locale::En => &self.en,
        };
        DiagnosisResult {
            condition: text.condition.to_string(),
            description: text.description.to_string(),
            confidence: self.confidence,
            first_aid: text.first_aid.iter().map(|s| s.to_string()).collect(),
        }
    }
}

static DEFAULT_ENTRY: Entry = Entry {
    confidence: 0.65,
    id: Text {
        condition: "Ketidaknyamanan Umum",
        description: "Gejala Anda menunjukkan ketidaknyamanan umum yang mungkin terkait dengan berbagai faktor termasuk stres, penyakit ringan, atau faktor gaya hidup.",
        first_aid: &[
            "Istirahat dan pantau gejala Anda",
            "Tetap terhidrasi",
            "Konsultasikan dengan profesional kesehatan jika gejala berlanjut atau memburuk",
        ],
    },
    en: Text {
        condition: "General Discomfort",
        description: "Your symptoms suggest a general discomfort that could be related to various factors including stress, minor illness, or lifestyle factors.",
        first_aid: &[
            "Rest and monitor your symptoms",
            "Stay hydrated",
            "Consult a healthcare professional if symptoms persist or worsen",
        ],
    },
};

static TABLE: Lazy<HashMap<DiagnosisKey, Entry>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        DiagnosisKey::new(Symptom::Fever, Severity::Moderate, Duration::FourToSevenDays),
        Entry {
            confidence: 0.85,
            id: Text {
                condition: "Influenza",
                description: "Infeksi virus yang menyerang sistem pernapasan Anda. Gejala umum termasuk demam, nyeri tubuh, dan kelelahan.",
                first_aid: &[
                    "Istirahat dan tetap terhidrasi",
                    "Minum obat penurun demam yang dijual bebas",
                    "Gunakan humidifier untuk meredakan hidung tersumbat",
                    "Konsultasikan dengan dokter jika gejala memburuk",
                ],
            },
            en: Text {
                condition: "Influenza",
                description: "A viral infection that attacks your respiratory system. Common symptoms include fever, body aches, and fatigue.",
                first_aid: &[
                    "Rest and stay hydrated",
                    "Take over-the-counter fever reducers",
                    "Use a humidifier to ease congestion",
                    "Consult a doctor if symptoms worsen",
                ],
            },
        },
    );

    table.insert(
        DiagnosisKey::new(Symptom::Headache, Severity::Severe, Duration::MoreThanWeek),
        Entry {
            confidence: 0.78,
            id: Text {
                condition: "Migrain",
                description: "Sakit kepala dengan intensitas bervariasi, sering disertai mual dan sensitivitas terhadap cahaya dan suara.",
                first_aid: &[
                    "Beristirahat di ruangan yang tenang dan gelap",
                    "Aplikasikan kompres dingin pada dahi Anda",
                    "Coba pereda nyeri yang dijual bebas",
                    "Tetap terhidrasi",
                    "Konsultasikan dengan dokter untuk migrain berulang",
                ],
            },
            en: Text {
                condition: "Migraine",
                description: "A headache of varying intensity, often accompanied by nausea and sensitivity to light and sound.",
                first_aid: &[
                    "Rest in a quiet, dark room",
                    "Apply cold compresses to your forehead",
                    "Try over-the-counter pain relievers",
                    "Stay hydrated",
                    "Consult a doctor for recurring migraines",
                ],
            },
        },
    );

    table.insert(
        DiagnosisKey::new(Symptom::Cough, Severity::Moderate, Duration::OneToThreeDays),
        Entry {
            confidence: 0.82,
            id: Text {
                condition: "Flu Biasa",
                description: "Infeksi virus pada hidung dan tenggorokan Anda. Biasanya tidak berbahaya, meskipun mungkin tidak terasa seperti itu.",
                first_aid: &[
                    "Istirahat yang cukup",
                    "Minum banyak cairan untuk mencegah dehidrasi",
                    "Gunakan obat flu yang dijual bebas",
                    "Coba madu untuk meredakan batuk",
                ],
            },
            en: Text {
                condition: "Common Cold",
                description: "A viral infection of your nose and throat. It's usually harmless, although it might not feel that way.",
                first_aid: &[
                    "Get plenty of rest",
                    "Drink fluids to prevent dehydration",
                    "Use over-the-counter cold medications",
                    "Try honey for cough relief",
                ],
            },
        },
    );

    table.insert(
        DiagnosisKey::new(Symptom::Fatigue, Severity::Mild, Duration::MoreThanWeek),
        Entry {
            confidence: 0.65,
            id: Text {
                condition: "Kelelahan Kronis",
                description: "Kelelahan ekstrem yang tidak dapat dijelaskan oleh kondisi medis yang mendasarinya.",
                first_aid: &[
                    "Tetapkan jadwal tidur yang teratur",
                    "Atur kecepatan diri selama beraktivitas",
                    "Hindari kafein, alkohol, dan nikotin",
                    "Pertimbangkan untuk berbicara dengan penyedia layanan kesehatan",
                ],
            },
            en: Text {
                condition: "Chronic Fatigue",
                description: "Extreme fatigue that can't be explained by an underlying medical condition.",
                first_aid: &[
                    "Establish a regular sleep schedule",
                    "Pace yourself during activities",
                    "Avoid caffeine, alcohol, and nicotine",
                    "Consider speaking with a healthcare provider",
                ],
            },
        },
    );

    table
});

/// 按应用内语言（印尼语）查表
pub fn resolve(input: &DiagnosisInput) -> DiagnosisResult {
    resolve_in(input, Locale::Id)
}

/// 按指定语言查表
///
/// 任一字段为空或未知时直接返回默认结果。
pub fn resolve_in(input: &DiagnosisInput, locale: Locale) -> DiagnosisResult {
    DiagnosisKey::from_input(input)
        .and_then(|key| TABLE.get(&key))
        .unwrap_or(&DEFAULT_ENTRY)
        .to_result(locale)
}

/// 默认结果
pub fn default_result(locale: Locale) -> DiagnosisResult {
    DEFAULT_ENTRY.to_result(locale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("fever", "moderate", "4_7_days", "Influenza", 0.85)]
    #[case("headache", "severe", "more_than_week", "Migrain", 0.78)]
    #[case("cough", "moderate", "1_3_days", "Flu Biasa", 0.82)]
    #[case("fatigue", "mild", "more_than_week", "Kelelahan Kronis", 0.65)]
    fn test_table_entries(
        #[case] symptom: &str,
        #[case] severity: &str,
        #[case] duration: &str,
        #[case] condition: &str,
        #[case] confidence: f64,
    ) {
        let result = resolve(&DiagnosisInput::new(symptom, severity, duration));
        assert_eq!(result.condition, condition);
        assert_eq!(result.confidence, confidence);
        assert!(!result.first_aid.is_empty());
    }

    #[rstest]
    #[case("fever", "moderate", "4_7_days", "Influenza")]
    #[case("headache", "severe", "more_than_week", "Migraine")]
    #[case("cough", "moderate", "1_3_days", "Common Cold")]
    #[case("fatigue", "mild", "more_than_week", "Chronic Fatigue")]
    fn test_english_entries(
        #[case] symptom: &str,
        #[case] severity: &str,
        #[case] duration: &str,
        #[case] condition: &str,
    ) {
        let result = resolve_in(&DiagnosisInput::new(symptom, severity, duration), Locale::En);
        assert_eq!(result.condition, condition);
    }

    #[rstest]
    #[case("chest_pain", "mild", "less_than_day")]
    #[case("fever", "severe", "4_7_days")]
    #[case("", "", "")]
    #[case("fever", "", "4_7_days")]
    #[case("FEVER", "moderate", "4_7_days")]
    #[case("unknown", "moderate", "4_7_days")]
    fn test_misses_fall_back_to_default(
        #[case] symptom: &str,
        #[case] severity: &str,
        #[case] duration: &str,
    ) {
        let result = resolve(&DiagnosisInput::new(symptom, severity, duration));
        assert_eq!(result, default_result(Locale::Id));
        assert_eq!(result.condition, "Ketidaknyamanan Umum");
        assert_eq!(result.confidence, 0.65);
        assert_eq!(result.first_aid.len(), 3);
    }

    #[test]
    fn test_resolve_is_pure() {
        let input = DiagnosisInput::new("headache", "severe", "more_than_week");
        assert_eq!(resolve(&input), resolve(&input));
        assert_eq!(
            resolve_in(&input, Locale::En),
            resolve_in(&input, Locale::En)
        );
    }

    #[test]
    fn test_locales_share_keys_and_confidence() {
        for symptom in Symptom::ALL {
            for severity in Severity::ALL {
                for duration in Duration::ALL {
                    let input =
                        DiagnosisInput::new(symptom.id(), severity.id(), duration.id());
                    let id = resolve_in(&input, Locale::Id);
                    let en = resolve_in(&input, Locale::En);
                    assert_eq!(id.confidence, en.confidence);
                    assert_eq!(id.first_aid.len(), en.first_aid.len());
                    assert!((0.0..=1.0).contains(&id.confidence));
                }
            }
        }
    }

    #[test]
    fn test_default_first_aid_english() {
        let result = default_result(Locale::En);
        assert_eq!(result.condition, "General Discomfort");
        assert_eq!(result.first_aid[0], "Rest and monitor your symptoms");
    }
}
