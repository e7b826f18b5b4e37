//! 存储工厂模块
//!
//! 根据配置创建相应的存储实例。启动时只创建一次，再通过 AppState 注入各组件。

use std::sync::Arc;

use crate::config::config::{DatabaseConfig, StorageBackend};
use crate::error::{AppError, Result};
use crate::storage::memory::MemoryStore;
use crate::storage::repository::{DiagnosisHistoryRepository, PostRepository, ProfileRepository};

#[cfg(feature = "surrealdb")]
use crate::storage::surrealdb::{
    SurrealDiagnosisHistoryRepository, SurrealPool, SurrealPostRepository,
    SurrealProfileRepository,
};

/// 存储实例
#[derive(Clone)]
pub struct Store {
    pub posts: Arc<dyn PostRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub history: Arc<dyn DiagnosisHistoryRepository>,
    backend: StoreBackend,
}

#[derive(Clone)]
enum StoreBackend {
    Memory,
    #[cfg(feature = "surrealdb")]
    SurrealDB(SurrealPool),
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.backend_name())
            .finish()
    }
}

impl Store {
    /// 由进程内存储构建
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            posts: store.clone(),
            profiles: store.clone(),
            history: store,
            backend: StoreBackend::Memory,
        }
    }

    /// 由 SurrealDB 连接池构建
    #[cfg(feature = "surrealdb")]
    pub fn surrealdb(pool: SurrealPool) -> Self {
        Self {
            posts: Arc::new(SurrealPostRepository::new(pool.clone())),
            profiles: Arc::new(SurrealProfileRepository::new(pool.clone())),
            history: Arc::new(SurrealDiagnosisHistoryRepository::new(pool.clone())),
            backend: StoreBackend::SurrealDB(pool),
        }
    }

    /// 后端名称
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            StoreBackend::Memory => "memory",
            #[cfg(feature = "surrealdb")]
            StoreBackend::SurrealDB(_) => "surrealdb",
        }
    }

    /// 检查存储是否可用
    pub async fn health_check(&self) -> Result<()> {
        match &self.backend {
            StoreBackend::Memory => Ok(()),
            #[cfg(feature = "surrealdb")]
            StoreBackend::SurrealDB(pool) => pool.health().await,
        }
    }
}

/// 存储工厂
pub struct StorageFactory;

impl StorageFactory {
    /// 根据配置创建存储实例
    pub async fn create(config: &DatabaseConfig) -> Result<Store> {
        match config.backend {
            StorageBackend::Memory => Ok(Store::memory(Arc::new(MemoryStore::new()))),
            #[cfg(feature = "surrealdb")]
            StorageBackend::Surrealdb => {
                let pool = SurrealPool::new(config)
                    .await
                    .map_err(|e| AppError::Connection(e.to_string()))?;
                Ok(Store::surrealdb(pool))
            }
            #[cfg(not(feature = "surrealdb"))]
            StorageBackend::Surrealdb => Err(AppError::Config(
                "SurrealDB feature is not enabled. Enable 'surrealdb' feature to use SurrealDB."
                    .into(),
            )),
        }
    }
}
