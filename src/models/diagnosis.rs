//! 症状问诊数据模型
//!
//! 输入以字符串 id 传输，解析为类型化的组合键后再查表。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 文案语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// 印尼语（应用内表单）
    #[default]
    Id,
    /// 英语（公开 API）
    En,
}

macro_rules! intake_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $id:literal, $label_id:literal, $label_en:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// 全部取值，按表单展示顺序
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// 传输用 id
            pub fn id(&self) -> &'static str {
                match self {
                    $($name::$variant => $id,)+
                }
            }

            /// 按 id 精确解析
            pub fn from_id(id: &str) -> Option<Self> {
                match id {
                    $($id => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// 展示标签
            pub fn label(&self, locale: Locale) -> &'static str {
                match (*self, locale) {
                    $(
                        ($name::$variant, Locale::Id) => $label_id,
                        ($name::$variant, Locale::En) => $label_en,
                    )+
                }
            }

            /// 按 id 取标签，未知 id 原样返回
            pub fn label_for_id(id: &str, locale: Locale) -> String {
                Self::from_id(id)
                    .map(|v| v.label(locale).to_string())
                    .unwrap_or_else(|| id.to_string())
            }
        }
    };
}

intake_enum! {
    /// 症状
    Symptom {
        Fever => "fever", "Demam", "Fever";
        Cough => "cough", "Batuk", "Cough";
        Headache => "headache", "Sakit Kepala", "Headache";
        Fatigue => "fatigue", "Kelelahan", "Fatigue";
        Nausea => "nausea", "Mual", "Nausea";
        Dizziness => "dizziness", "Pusing", "Dizziness";
        SoreThroat => "sore_throat", "Sakit Tenggorokan", "Sore Throat";
        ChestPain => "chest_pain", "Nyeri Dada", "Chest Pain";
    }
}

intake_enum! {
    /// 严重程度
    Severity {
        Mild => "mild", "Ringan", "Mild";
        Moderate => "moderate", "Sedang", "Moderate";
        Severe => "severe", "Berat", "Severe";
    }
}

intake_enum! {
    /// 持续时间
    Duration {
        LessThanDay => "less_than_day", "Kurang dari sehari", "Less than a day";
        OneToThreeDays => "1_3_days", "1-3 hari", "1-3 days";
        FourToSevenDays => "4_7_days", "4-7 hari", "4-7 days";
        MoreThanWeek => "more_than_week", "Lebih dari seminggu", "More than a week";
    }
}

/// 问诊输入（传输格式）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisInput {
    pub symptom: String,
    pub severity: String,
    pub duration: String,
}

impl DiagnosisInput {
    pub fn new(
        symptom: impl Into<String>,
        severity: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            symptom: symptom.into(),
            severity: severity.into(),
            duration: duration.into(),
        }
    }

    /// 第一个为空的字段名
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("symptom", &self.symptom),
            ("severity", &self.severity),
            ("duration", &self.duration),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// 查表用组合键，字段位置固定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosisKey {
    pub symptom: Symptom,
    pub severity: Severity,
    pub duration: Duration,
}

impl DiagnosisKey {
    pub const fn new(symptom: Symptom, severity: Severity, duration: Duration) -> Self {
        Self {
            symptom,
            severity,
            duration,
        }
    }

    /// 任一 id 为空或未知时无法组成键
    pub fn from_input(input: &DiagnosisInput) -> Option<Self> {
        Some(Self {
            symptom: Symptom::from_id(&input.symptom)?,
            severity: Severity::from_id(&input.severity)?,
            duration: Duration::from_id(&input.duration)?,
        })
    }
}

/// 问诊结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub condition: String,
    pub description: String,
    /// 固定常数，取值 [0, 1]
    pub confidence: f64,
    #[serde(rename = "firstAid")]
    pub first_aid: Vec<String>,
}

/// 问诊历史记录（只写）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisHistoryRecord {
    pub id: String,
    pub user_id: String,
    pub condition: String,
    /// 症状标签
    pub symptoms: String,
    /// 严重程度标签
    pub severity: String,
    /// 持续时间标签
    pub duration: String,
    pub confidence: f64,
    /// 急救建议，以 ", " 连接
    pub recommendations: String,
    pub created_at: DateTime<Utc>,
}

impl DiagnosisHistoryRecord {
    /// 由输入与结果投影出历史记录，标签使用应用内语言
    pub fn project(
        id: String,
        user_id: &str,
        input: &DiagnosisInput,
        result: &DiagnosisResult,
    ) -> Self {
        Self {
            id,
            user_id: user_id.to_string(),
            condition: result.condition.clone(),
            symptoms: Symptom::label_for_id(&input.symptom, Locale::Id),
            severity: Severity::label_for_id(&input.severity, Locale::Id),
            duration: Duration::label_for_id(&input.duration, Locale::Id),
            confidence: result.confidence,
            recommendations: result.first_aid.join(", "),
            created_at: Utc::now(),
        }
    }
}
