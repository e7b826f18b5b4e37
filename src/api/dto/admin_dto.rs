//! 管理后台 DTO

use serde::{Deserialize, Serialize};

use crate::services::dashboard::DashboardStats;

/// 概览响应
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// 当前管理员
    pub user_id: String,
    pub stats: DashboardStats,
}
