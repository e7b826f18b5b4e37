//! 管理后台概览

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::storage::repository::{PostRepository, ProfileRepository};

/// 概览统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub blog_posts: u64,
    pub users: u64,
}

#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn stats(&self) -> Result<DashboardStats>;
}

pub struct DashboardServiceImpl {
    posts: Arc<dyn PostRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl DashboardServiceImpl {
    pub fn new(posts: Arc<dyn PostRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { posts, profiles }
    }
}

#[async_trait]
impl DashboardService for DashboardServiceImpl {
    async fn stats(&self) -> Result<DashboardStats> {
        let (blog_posts, users) = tokio::try_join!(self.posts.count(), self.profiles.count())?;
        Ok(DashboardStats { blog_posts, users })
    }
}

/// 创建概览服务
pub fn create_dashboard_service(
    posts: Arc<dyn PostRepository>,
    profiles: Arc<dyn ProfileRepository>,
) -> Box<dyn DashboardService> {
    Box::new(DashboardServiceImpl::new(posts, profiles))
}
