//! 文章 DTO
//!
//! 管理后台文章表单与列表的请求和响应数据结构。

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::post::{Category, Post};
use crate::services::post::PostFields;

/// 表单字段不能为空白
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// 创建/更新文章请求
///
/// 两者字段相同，更新时整体覆盖。
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostRequest {
    /// 标题
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    /// 正文
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    /// 摘要
    #[validate(custom(function = "not_blank"))]
    pub excerpt: String,
    /// 分类
    pub category: Category,
    /// 封面图，为空时使用占位图
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub image_url: Option<String>,
}

impl From<PostRequest> for PostFields {
    fn from(request: PostRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            excerpt: request.excerpt,
            category: request.category,
            image_url: request.image_url,
        }
    }
}

/// 后台列表查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListPostsParams {
    /// 标题或分类搜索词
    pub search: Option<String>,
}

/// 删除查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeletePostParams {
    /// 必须显式确认
    pub confirm: bool,
}

/// 文章列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct PostListResponse {
    /// 文章
    pub posts: Vec<Post>,
    /// 数量
    pub total: usize,
}

/// 删除文章响应
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletePostResponse {
    pub id: String,
    /// 删除前是否存在
    pub deleted: bool,
}

/// 分类选项
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}
