//! 存储层模块
//!
//! 提供数据持久化服务，支持 SurrealDB 和进程内存储。

#[cfg(feature = "surrealdb")]
pub mod surrealdb;

pub mod factory;
pub mod memory;
pub mod repository;

pub use factory::{StorageFactory, Store};
pub use memory::MemoryStore;
pub use repository::{DiagnosisHistoryRepository, PostRepository, ProfileRepository};
