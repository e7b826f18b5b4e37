//! 服务模块

pub mod dashboard;
pub mod diagnosis;
pub mod post;
pub mod resolver;

pub use dashboard::{DashboardService, DashboardStats, create_dashboard_service};
pub use diagnosis::{DiagnosisService, SAVE_DIAGNOSIS_FAILED, create_diagnosis_service};
pub use post::{PostFields, PostPage, PostQuery, PostService, SAVE_POST_FAILED, create_post_service};
pub use resolver::{default_result, resolve, resolve_in};
