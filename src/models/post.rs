//! 博客文章数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 未提供封面图时使用的占位图
pub const PLACEHOLDER_IMAGE_URL: &str = "/placeholder.svg?height=400&width=800";

/// 文章分类（固定 7 项）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Health Tips")]
    HealthTips,
    #[serde(rename = "Nutrition")]
    Nutrition,
    #[serde(rename = "First Aid")]
    FirstAid,
    #[serde(rename = "Mental Health")]
    MentalHealth,
    #[serde(rename = "Wellness")]
    Wellness,
    #[serde(rename = "Chronic Care")]
    ChronicCare,
    #[serde(rename = "Preventive Care")]
    PreventiveCare,
}

impl Category {
    /// 全部分类，按表单展示顺序
    pub const ALL: [Category; 7] = [
        Category::HealthTips,
        Category::Nutrition,
        Category::FirstAid,
        Category::MentalHealth,
        Category::Wellness,
        Category::ChronicCare,
        Category::PreventiveCare,
    ];

    /// 分类标签
    pub fn label(&self) -> &'static str {
        match self {
            Category::HealthTips => "Health Tips",
            Category::Nutrition => "Nutrition",
            Category::FirstAid => "First Aid",
            Category::MentalHealth => "Mental Health",
            Category::Wellness => "Wellness",
            Category::ChronicCare => "Chronic Care",
            Category::PreventiveCare => "Preventive Care",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// 可编辑字段
///
/// 创建与更新共用，更新时整体覆盖（没有部分补丁，也没有并发版本号）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: Category,
    pub image_url: String,
    pub author_id: String,
}

impl PostDraft {
    /// 创建草稿，空封面图替换为占位图
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        excerpt: impl Into<String>,
        category: Category,
        image_url: Option<String>,
        author_id: impl Into<String>,
    ) -> Self {
        let image_url = image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string());

        Self {
            title: title.into(),
            content: content.into(),
            excerpt: excerpt.into(),
            category,
            image_url,
            author_id: author_id.into(),
        }
    }
}

/// 博客文章
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// 由存储层生成
    pub id: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: Category,
    pub image_url: String,
    pub author_id: String,
    /// 由存储层写入
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// 由草稿组装文章
    pub fn from_draft(id: String, draft: PostDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            excerpt: draft.excerpt,
            category: draft.category,
            image_url: draft.image_url,
            author_id: draft.author_id,
            created_at,
        }
    }

    /// 用草稿覆盖可编辑字段，保留 id 和创建时间
    pub fn overwrite(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.content = draft.content;
        self.excerpt = draft.excerpt;
        self.category = draft.category;
        self.image_url = draft.image_url;
        self.author_id = draft.author_id;
    }

    /// 标题或分类是否包含搜索词（忽略大小写）
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.category.label().to_lowercase().contains(needle_lower)
    }
}

/// 本地过滤：对已取回的列表做大小写不敏感的子串匹配
///
/// 空搜索词返回全部文章。
pub fn filter_posts<'a>(posts: &'a [Post], term: &str) -> Vec<&'a Post> {
    let needle = term.trim().to_lowercase();
    posts.iter().filter(|p| p.matches(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, title: &str, category: Category) -> Post {
        Post::from_draft(
            id.to_string(),
            PostDraft::new(title, "body", "summary", category, None, "author-1"),
            Utc::now(),
        )
    }

    #[test]
    fn test_category_serde_uses_labels() {
        let json = serde_json::to_string(&Category::MentalHealth).unwrap();
        assert_eq!(json, "\"Mental Health\"");
        let parsed: Category = serde_json::from_str("\"Preventive Care\"").unwrap();
        assert_eq!(parsed, Category::PreventiveCare);
        assert!(serde_json::from_str::<Category>("\"Gardening\"").is_err());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("First Aid".parse::<Category>(), Ok(Category::FirstAid));
        assert!("first aid".parse::<Category>().is_err());
    }

    #[test]
    fn test_draft_defaults_image_url() {
        let draft = PostDraft::new("t", "c", "e", Category::Wellness, None, "u");
        assert_eq!(draft.image_url, PLACEHOLDER_IMAGE_URL);

        let draft = PostDraft::new("t", "c", "e", Category::Wellness, Some("  ".into()), "u");
        assert_eq!(draft.image_url, PLACEHOLDER_IMAGE_URL);

        let draft = PostDraft::new(
            "t",
            "c",
            "e",
            Category::Wellness,
            Some("/img/a.png".into()),
            "u",
        );
        assert_eq!(draft.image_url, "/img/a.png");
    }

    #[test]
    fn test_filter_by_title_any_case() {
        let posts = vec![
            post("1", "Flu Guide", Category::HealthTips),
            post("2", "Diet Basics", Category::Nutrition),
        ];

        for term in ["flu", "FLU", "Flu"] {
            let filtered = filter_posts(&posts, term);
            assert_eq!(filtered.len(), 1);
            assert_eq!(filtered[0].title, "Flu Guide");
        }
    }

    #[test]
    fn test_filter_by_category() {
        let posts = vec![
            post("1", "Flu Guide", Category::HealthTips),
            post("2", "Diet Basics", Category::Nutrition),
        ];

        let filtered = filter_posts(&posts, "nutri");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "2");
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let posts = vec![
            post("1", "Flu Guide", Category::HealthTips),
            post("2", "Diet Basics", Category::Nutrition),
        ];
        assert_eq!(filter_posts(&posts, "").len(), 2);
    }

    #[test]
    fn test_overwrite_keeps_identity() {
        let mut p = post("1", "Old", Category::Wellness);
        let created_at = p.created_at;
        p.overwrite(PostDraft::new("New", "c", "e", Category::FirstAid, None, "editor"));
        assert_eq!(p.id, "1");
        assert_eq!(p.created_at, created_at);
        assert_eq!(p.title, "New");
        assert_eq!(p.author_id, "editor");
    }
}
