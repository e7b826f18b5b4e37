//! CareDesk - 健康资讯后台与症状问诊服务
//!
//! 提供博客文章管理后台、基于查表的症状问诊及问诊历史保存，
//! 会话由外部认证服务签发，数据存放在 SurrealDB（或进程内存储）中。

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;
pub mod storage;
