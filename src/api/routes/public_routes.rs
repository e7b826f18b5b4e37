//! Public Routes
//!
//! 无需登录的公开 API，挂载在 `/api` 下。

use crate::api::handlers::public_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建公开 API 路由器
pub fn create_public_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/posts", get(list_posts))
        .route("/posts/:id", get(get_post))
        .route("/diagnose", post(diagnose))
}
