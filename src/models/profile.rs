//! 用户资料数据模型
//!
//! 资料只读，偏好是非结构化的键值对，其中 `is_admin` 决定是否可访问管理后台。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 用户资料
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// 与会话主体相同的标识
    pub id: String,

    /// 非结构化偏好
    #[serde(default)]
    pub preferences: HashMap<String, serde_json::Value>,
}

impl Profile {
    /// 创建空偏好的资料
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            preferences: HashMap::new(),
        }
    }

    /// 设置偏好字段
    pub fn with_preference(mut self, key: &str, value: serde_json::Value) -> Self {
        self.preferences.insert(key.to_string(), value);
        self
    }

    /// 只有 `is_admin` 严格等于 `true` 才算管理员
    pub fn is_admin(&self) -> bool {
        matches!(
            self.preferences.get("is_admin"),
            Some(serde_json::Value::Bool(true))
        )
    }
}
