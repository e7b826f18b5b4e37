use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::diagnosis_dto::*},
    error::AppError,
    models::diagnosis::DiagnosisInput,
    security::gate::AuthSession,
    services::resolver::resolve,
};

/// 表单字段必须都已选择
fn require_complete(input: &DiagnosisInput) -> Result<(), AppError> {
    match input.first_missing_field() {
        Some(field) => Err(AppError::Validation(format!("{} is required", field))),
        None => Ok(()),
    }
}

pub async fn diagnosis_options(
    Query(params): Query<OptionsParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(DiagnosisOptionsResponse::for_locale(params.locale)))
}

pub async fn diagnose(Json(input): Json<DiagnosisInput>) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Resolving diagnosis: {}+{}+{}",
        input.symptom, input.severity, input.duration
    );

    require_complete(&input)?;
    Ok(Json(resolve(&input)))
}

pub async fn save_diagnosis(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(request): Json<SaveDiagnosisRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Saving diagnosis for {}", session.user_id);

    require_complete(&request.input)?;
    let result = resolve(&request.input);
    let id = state
        .diagnosis_service
        .save_result(
            &session,
            &request.input,
            &result,
            request.submission_id.as_deref(),
        )
        .await?;

    Ok(Json(SaveDiagnosisResponse { id, saved: true }))
}
