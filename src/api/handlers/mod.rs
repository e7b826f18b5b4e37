//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod admin_handler;
pub mod diagnosis_handler;
pub mod post_handler;
pub mod public_handler;
