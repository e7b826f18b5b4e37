//! 文章服务
//!
//! 管理后台的增删改查，以及公开 API 的分页列表。每个操作对应一次存储调用。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::error::{AppError, Result};
use crate::models::post::{Category, Post, PostDraft, filter_posts};
use crate::models::session::Session;
use crate::storage::repository::PostRepository;

/// 创建或更新失败时展示给用户的提示
pub const SAVE_POST_FAILED: &str = "Failed to save post. Please try again.";

/// 表单字段（作者由会话决定）
#[derive(Debug, Clone, PartialEq)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: Category,
    pub image_url: Option<String>,
}

impl PostFields {
    /// 附上作者，得到可写入的草稿
    pub fn into_draft(self, author_id: &str) -> PostDraft {
        PostDraft::new(
            self.title,
            self.content,
            self.excerpt,
            self.category,
            self.image_url,
            author_id,
        )
    }
}

/// 公开列表查询参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostQuery {
    /// 页码（从 1 开始）
    pub page: usize,
    /// 每页数量
    pub per_page: usize,
    /// 分类精确匹配
    pub category: Option<Category>,
    /// 标题或分类子串
    pub search: Option<String>,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            category: None,
            search: None,
        }
    }
}

impl PostQuery {
    /// 计算偏移量，超大页码饱和到 usize::MAX（结果为空页）
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// 一页文章
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<Post>,
    /// 过滤后、分页前的总数
    pub total: usize,
}

/// 文章服务 trait
#[async_trait]
pub trait PostService: Send + Sync {
    /// 全部文章（按创建时间倒序），可选本地过滤
    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>>;

    /// 公开 API 分页列表
    async fn list_page(&self, query: &PostQuery) -> Result<PostPage>;

    /// 获取单篇文章，不存在时返回 NotFound
    async fn get(&self, id: &str) -> Result<Post>;

    /// 创建文章，作者为当前用户
    async fn create(&self, session: &Session, fields: PostFields) -> Result<Post>;

    /// 整体覆盖可编辑字段，后写者覆盖先写者
    async fn update(&self, session: &Session, id: &str, fields: PostFields) -> Result<Post>;

    /// 删除文章，返回删除前是否存在；删除不存在的 ID 视为成功
    async fn delete(&self, id: &str) -> Result<bool>;

    /// 文章总数
    async fn count(&self) -> Result<u64>;
}

/// 文章服务实现
pub struct PostServiceImpl {
    repository: Arc<dyn PostRepository>,
}

impl PostServiceImpl {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl PostService for PostServiceImpl {
    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>> {
        let posts = self.repository.list_recent().await?;
        match search {
            Some(term) if !term.trim().is_empty() => Ok(filter_posts(&posts, term)
                .into_iter()
                .cloned()
                .collect()),
            _ => Ok(posts),
        }
    }

    async fn list_page(&self, query: &PostQuery) -> Result<PostPage> {
        let needle = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();

        let filtered: Vec<Post> = self
            .repository
            .list_recent()
            .await?
            .into_iter()
            .filter(|p| query.category.is_none_or(|c| p.category == c))
            .filter(|p| p.matches(&needle))
            .collect();

        let total = filtered.len();
        let posts = filtered
            .into_iter()
            .skip(query.offset())
            .take(query.per_page)
            .collect();

        Ok(PostPage { posts, total })
    }

    async fn get(&self, id: &str) -> Result<Post> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post not found: {}", id)))
    }

    async fn create(&self, session: &Session, fields: PostFields) -> Result<Post> {
        let draft = fields.into_draft(&session.user_id);
        let post = self
            .repository
            .insert(&draft)
            .await
            .map_err(|e| e.user_facing(SAVE_POST_FAILED))?;

        info!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(post)
    }

    async fn update(&self, session: &Session, id: &str, fields: PostFields) -> Result<Post> {
        let draft = fields.into_draft(&session.user_id);
        let post = self
            .repository
            .update(id, &draft)
            .await
            .map_err(|e| e.user_facing(SAVE_POST_FAILED))?
            .ok_or_else(|| AppError::NotFound(format!("Post not found: {}", id)))?;

        info!(post_id = %post.id, author_id = %post.author_id, "Post updated");
        Ok(post)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        match self.repository.delete(id).await {
            Ok(existed) => {
                info!(post_id = %id, existed, "Post deleted");
                Ok(existed)
            }
            Err(e) => {
                error!(post_id = %id, "Error deleting post: {}", e);
                Err(AppError::Internal("Error deleting post".into()))
            }
        }
    }

    async fn count(&self) -> Result<u64> {
        self.repository.count().await
    }
}

/// 创建文章服务
pub fn create_post_service(repository: Arc<dyn PostRepository>) -> Box<dyn PostService> {
    Box::new(PostServiceImpl::new(repository))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::post::PLACEHOLDER_IMAGE_URL;
    use crate::storage::memory::MemoryStore;
    use crate::storage::repository::MockPostRepository;
    use chrono::{Duration, Utc};

    fn session(user_id: &str) -> Session {
        Session {
            user_id: user_id.to_string(),
            email: None,
            role: "authenticated".into(),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    fn fields(title: &str, category: Category) -> PostFields {
        PostFields {
            title: title.to_string(),
            content: "content".into(),
            excerpt: "excerpt".into(),
            category,
            image_url: None,
        }
    }

    fn service() -> PostServiceImpl {
        PostServiceImpl::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let service = service();
        let created = service
            .create(&session("admin-1"), fields("T", Category::Wellness))
            .await
            .unwrap();

        let posts = service.list(None).await.unwrap();
        let matching: Vec<&Post> = posts.iter().filter(|p| p.title == "T").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].author_id, "admin-1");
        assert_eq!(matching[0].id, created.id);
        assert_eq!(matching[0].image_url, PLACEHOLDER_IMAGE_URL);
    }

    #[tokio::test]
    async fn test_delete_then_list() {
        let service = service();
        let post = service
            .create(&session("admin-1"), fields("Gone", Category::Nutrition))
            .await
            .unwrap();

        assert!(service.delete(&post.id).await.unwrap());
        assert!(service.list(None).await.unwrap().iter().all(|p| p.id != post.id));
        assert!(!service.delete(&post.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_overwrites_and_sets_author() {
        let service = service();
        let post = service
            .create(&session("admin-1"), fields("Old", Category::Nutrition))
            .await
            .unwrap();

        let updated = service
            .update(&session("admin-2"), &post.id, fields("New", Category::FirstAid))
            .await
            .unwrap();
        assert_eq!(updated.id, post.id);
        assert_eq!(updated.title, "New");
        assert_eq!(updated.category, Category::FirstAid);
        assert_eq!(updated.author_id, "admin-2");
        assert_eq!(updated.created_at, post.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let err = service()
            .update(&session("a"), "missing", fields("x", Category::Wellness))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        assert!(matches!(
            service().get("missing").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_list_with_search() {
        let service = service();
        service
            .create(&session("a"), fields("Flu Guide", Category::HealthTips))
            .await
            .unwrap();
        service
            .create(&session("a"), fields("Diet Basics", Category::Nutrition))
            .await
            .unwrap();

        let posts = service.list(Some("FLU")).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Flu Guide");
        assert_eq!(service.list(Some("  ")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_page_counts_before_paging() {
        let service = service();
        for i in 0..5 {
            service
                .create(&session("a"), fields(&format!("Tip {}", i), Category::HealthTips))
                .await
                .unwrap();
        }
        service
            .create(&session("a"), fields("Soup", Category::Nutrition))
            .await
            .unwrap();

        let page = service
            .list_page(&PostQuery {
                page: 2,
                per_page: 2,
                category: Some(Category::HealthTips),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.posts.len(), 2);
        assert_eq!(page.posts[0].title, "Tip 2");

        let page = service
            .list_page(&PostQuery {
                search: Some("soup".into()),
                ..PostQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_list_page_huge_page_is_empty() {
        let service = service();
        service
            .create(&session("a"), fields("Only", Category::Wellness))
            .await
            .unwrap();

        let page = service
            .list_page(&PostQuery {
                page: usize::MAX,
                per_page: 100,
                ..PostQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert!(page.posts.is_empty());
    }

    #[test]
    fn test_offset_saturates() {
        let query = PostQuery {
            page: usize::MAX,
            per_page: 10,
            ..PostQuery::default()
        };
        assert_eq!(query.offset(), usize::MAX);
        assert_eq!(PostQuery { page: 3, per_page: 10, ..PostQuery::default() }.offset(), 20);
    }

    #[tokio::test]
    async fn test_create_failure_uses_generic_message() {
        let mut repository = MockPostRepository::new();
        repository
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::Database("row level policy".into())));

        let err = PostServiceImpl::new(Arc::new(repository))
            .create(&session("a"), fields("T", Category::Wellness))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), SAVE_POST_FAILED);
    }

    #[tokio::test]
    async fn test_delete_failure_is_internal() {
        let mut repository = MockPostRepository::new();
        repository
            .expect_delete()
            .returning(|_| Err(AppError::Database("timeout".into())));

        let err = PostServiceImpl::new(Arc::new(repository))
            .delete("p1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
