//! API 模块
//!
//! 提供 REST API 支持：`/api/v1` 下是管理后台与问诊表单，`/api` 下是公开接口。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use std::time::Duration;

use crate::api::app_state::AppState;
use crate::config::config::ServerConfig;
use crate::security::middleware::{cors_layer, security_headers_middleware};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState, server: &ServerConfig) -> Router {
    let api = Router::new()
        .merge(routes::diagnosis_routes::create_diagnosis_router())
        .merge(routes::admin_routes::create_admin_router())
        .merge(routes::post_routes::create_post_router());

    Router::new()
        .nest("/api/v1", api)
        .nest("/api", routes::public_routes::create_public_router())
        // Add security headers middleware to all routes
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout.max(1),
        )))
        .layer(cors_layer(&server.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
