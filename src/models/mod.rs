//! 核心数据模型模块
//!
//! 定义文章、用户资料、会话以及症状问诊相关的数据结构。

pub mod diagnosis;
pub mod post;
pub mod profile;
pub mod session;

pub use diagnosis::*;
pub use post::*;
pub use profile::*;
pub use session::*;
