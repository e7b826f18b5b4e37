//! DTO 模块
//!
//! 数据传输对象，用于 API 请求和响应的序列化。

pub mod admin_dto;
pub mod diagnosis_dto;
pub mod post_dto;
pub mod public_dto;

pub use admin_dto::*;
pub use diagnosis_dto::*;
pub use post_dto::*;
pub use public_dto::*;
