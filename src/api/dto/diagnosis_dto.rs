//! 问诊 DTO

use serde::{Deserialize, Serialize};

use crate::models::diagnosis::{DiagnosisInput, Duration, Locale, Severity, Symptom};

/// 保存问诊历史请求
#[derive(Debug, Clone, Deserialize)]
pub struct SaveDiagnosisRequest {
    /// 表单输入，结果由服务端重新查表
    #[serde(flatten)]
    pub input: DiagnosisInput,
    /// 客户端生成的提交 ID，用于幂等保存
    #[serde(default)]
    pub submission_id: Option<String>,
}

/// 保存问诊历史响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveDiagnosisResponse {
    pub id: String,
    pub saved: bool,
}

/// 选项查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OptionsParams {
    pub locale: Locale,
}

/// 单个选项
#[derive(Debug, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub label: String,
}

/// 表单选项响应
#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosisOptionsResponse {
    pub symptoms: Vec<OptionItem>,
    pub severities: Vec<OptionItem>,
    pub durations: Vec<OptionItem>,
}

impl DiagnosisOptionsResponse {
    /// 按语言列出全部选项
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            symptoms: Symptom::ALL
                .iter()
                .map(|v| OptionItem {
                    id: v.id().to_string(),
                    label: v.label(locale).to_string(),
                })
                .collect(),
            severities: Severity::ALL
                .iter()
                .map(|v| OptionItem {
                    id: v.id().to_string(),
                    label: v.label(locale).to_string(),
                })
                .collect(),
            durations: Duration::ALL
                .iter()
                .map(|v| OptionItem {
                    id: v.id().to_string(),
                    label: v.label(locale).to_string(),
                })
                .collect(),
        }
    }
}
