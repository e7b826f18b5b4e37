use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 已认证的调用方上下文
///
/// 由外部认证服务签发的访问令牌解析而来。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// 用户 ID（令牌 subject）
    pub user_id: String,
    /// 邮箱
    pub email: Option<String>,
    /// 认证服务给出的角色
    pub role: String,
    /// 过期时间
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// 是否已过期
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
