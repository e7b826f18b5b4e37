use axum::{Json, extract::State, response::IntoResponse};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::admin_dto::DashboardResponse},
    error::AppError,
    security::gate::AdminSession,
};

pub async fn dashboard(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
) -> Result<impl IntoResponse, AppError> {
    debug!("Loading dashboard for {}", session.user_id);

    let stats = state.dashboard_service.stats().await?;
    Ok(Json(DashboardResponse {
        user_id: session.user_id,
        stats,
    }))
}
