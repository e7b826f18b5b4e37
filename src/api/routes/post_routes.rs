//! Post Routes
//!
//! 管理后台文章路由，全部需要管理员会话。

use crate::api::handlers::post_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建文章路由器
pub fn create_post_router() -> Router<AppState> {
    Router::new()
        .route("/admin/posts", get(list_posts).post(create_post))
        .route(
            "/admin/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/admin/categories", get(list_categories))
}
