//! Admin Routes

use crate::api::handlers::admin_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建管理后台概览路由器
pub fn create_admin_router() -> Router<AppState> {
    Router::new().route("/admin", get(dashboard))
}
