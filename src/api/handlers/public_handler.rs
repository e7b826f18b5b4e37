use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::public_dto::HealthResponse},
    error::AppError,
    models::diagnosis::{DiagnosisInput, Locale},
    services::{post::PostQuery, resolver::resolve_in},
};

/// 每页数量上限
const MAX_PER_PAGE: usize = 100;

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostQuery>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Public post listing: page={}, per_page={}, category={:?}",
        query.page, query.per_page, query.category
    );

    if query.page == 0 || query.per_page == 0 || query.per_page > MAX_PER_PAGE {
        return Err(AppError::Validation(format!(
            "page must be >= 1 and per_page between 1 and {}",
            MAX_PER_PAGE
        )));
    }

    let page = state.post_service.list_page(&query).await?;
    Ok(Json(page))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Public post: {}", id);

    let post = state.post_service.get(&id).await?;
    Ok(Json(post))
}

/// 公开查表接口，缺字段时同样返回默认结果
pub async fn diagnose(Json(input): Json<DiagnosisInput>) -> impl IntoResponse {
    debug!(
        "Public diagnosis: {}+{}+{}",
        input.symptom, input.severity, input.duration
    );

    Json(resolve_in(&input, Locale::En))
}
