//! Diagnosis Routes

use crate::api::handlers::diagnosis_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建问诊路由器
pub fn create_diagnosis_router() -> Router<AppState> {
    Router::new()
        .route("/diagnosis/options", get(diagnosis_options))
        .route("/diagnosis", post(diagnose))
        .route("/diagnosis/history", post(save_diagnosis))
}
