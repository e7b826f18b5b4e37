use async_trait::async_trait;

use crate::error::Result;
use crate::models::diagnosis::DiagnosisHistoryRecord;
use crate::models::post::{Post, PostDraft};
use crate::models::profile::Profile;

/// 表名
pub const POSTS_TABLE: &str = "blog_posts";
pub const PROFILES_TABLE: &str = "profiles";
pub const DIAGNOSIS_HISTORY_TABLE: &str = "diagnosis_history";

/// 文章仓储 trait
///
/// 每个操作都是一次独立的存储调用，不跨操作加事务。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// 插入文章，id 与创建时间由存储层生成
    async fn insert(&self, draft: &PostDraft) -> Result<Post>;

    /// 根据 ID 获取文章
    async fn get_by_id(&self, id: &str) -> Result<Option<Post>>;

    /// 覆盖可编辑字段，不存在时返回 None
    async fn update(&self, id: &str, draft: &PostDraft) -> Result<Option<Post>>;

    /// 删除文章，返回删除前是否存在
    async fn delete(&self, id: &str) -> Result<bool>;

    /// 全部文章，按创建时间倒序
    async fn list_recent(&self) -> Result<Vec<Post>>;

    /// 统计数量
    async fn count(&self) -> Result<u64>;
}

/// 用户资料仓储 trait（只读）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// 根据 ID 获取资料
    async fn get_by_id(&self, id: &str) -> Result<Option<Profile>>;

    /// 统计数量
    async fn count(&self) -> Result<u64>;
}

/// 问诊历史仓储 trait（只写）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiagnosisHistoryRepository: Send + Sync {
    /// 插入一条记录，返回记录 ID
    async fn insert(&self, record: &DiagnosisHistoryRecord) -> Result<String>;

    /// 按 ID 写入，已存在时覆盖结果字段，保留首次写入的 created_at
    async fn upsert(&self, record: &DiagnosisHistoryRecord) -> Result<String>;
}
