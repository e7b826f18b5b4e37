//! Routes 模块
//!
//! 定义 API 路由。

pub mod admin_routes;
pub mod diagnosis_routes;
pub mod post_routes;
pub mod public_routes;
