use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;
use validator::Validate;

use crate::{
    api::{app_state::AppState, dto::post_dto::*},
    error::AppError,
    models::post::Category,
    security::gate::AdminSession,
};

pub async fn list_posts(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Query(params): Query<ListPostsParams>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Listing posts for {}: search={:?}",
        session.user_id, params.search
    );

    let posts = state.post_service.list(params.search.as_deref()).await?;
    let total = posts.len();

    Ok(Json(PostListResponse { posts, total }))
}

pub async fn get_post(
    State(state): State<AppState>,
    AdminSession(_session): AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Getting post: {}", id);

    let post = state.post_service.get(&id).await?;
    Ok(Json(post))
}

pub async fn create_post(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Json(request): Json<PostRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Creating post: {}", request.title);

    request.validate()?;
    let post = state.post_service.create(&session, request.into()).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
    Json(request): Json<PostRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Updating post: {}", id);

    request.validate()?;
    let post = state
        .post_service
        .update(&session, &id, request.into())
        .await?;

    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
    Query(params): Query<DeletePostParams>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Deleting post {} by {}", id, session.user_id);

    if !params.confirm {
        return Err(AppError::Validation(
            "Deleting a post cannot be undone; repeat the request with ?confirm=true".into(),
        ));
    }

    let deleted = state.post_service.delete(&id).await?;
    Ok(Json(DeletePostResponse { id, deleted }))
}

pub async fn list_categories(
    AdminSession(_session): AdminSession,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(CategoryListResponse {
        categories: Category::ALL.to_vec(),
    }))
}
