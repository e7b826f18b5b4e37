use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{
    RecordId, Surreal,
    engine::any::{Any, connect},
    opt::auth::Root,
};
use uuid::Uuid;

use crate::config::config::DatabaseConfig;
use crate::error::Result;
use crate::models::diagnosis::DiagnosisHistoryRecord;
use crate::models::post::{Category, Post, PostDraft};
use crate::models::profile::Profile;
use crate::storage::repository::{
    DIAGNOSIS_HISTORY_TABLE, DiagnosisHistoryRepository, POSTS_TABLE, PROFILES_TABLE,
    PostRepository, ProfileRepository,
};

/// 覆盖可编辑字段并返回更新后的行；记录不存在时没有返回行
const UPDATE_POST: &str =
    "UPDATE type::thing($table, $id) MERGE $patch RETURN *, record::id(id) AS id";

/// 返回删除前的行；记录不存在时没有返回行
const DELETE_POST: &str = "DELETE type::thing($table, $id) RETURN BEFORE";

const LIST_POSTS: &str =
    "SELECT *, record::id(id) AS id FROM type::table($table) ORDER BY created_at DESC";

const INSERT_HISTORY: &str = "CREATE type::thing($table, $id) CONTENT $row RETURN NONE";

/// 重复写入只更新结果字段，created_at 保留首次写入的值
const UPSERT_HISTORY: &str = "UPSERT type::thing($table, $id) SET \
    user_id = $row.user_id, \
    condition = $row.condition, \
    symptoms = $row.symptoms, \
    severity = $row.severity, \
    duration = $row.duration, \
    confidence = $row.confidence, \
    recommendations = $row.recommendations, \
    created_at = created_at ?? $row.created_at \
    RETURN NONE";

/// SurrealDB 连接
#[derive(Clone)]
pub struct SurrealPool {
    db: Surreal<Any>,
}

impl SurrealPool {
    /// 连接、认证并选择命名空间和数据库
    pub async fn new(config: &DatabaseConfig) -> std::result::Result<Self, surrealdb::Error> {
        let db: Surreal<Any> = connect(&config.url).await?;

        db.signin(Root {
            username: &config.username,
            password: &config.password,
        })
        .await?;

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        Ok(Self { db })
    }

    /// 获取内部数据库实例
    pub fn inner(&self) -> &Surreal<Any> {
        &self.db
    }

    /// 健康检查
    pub async fn health(&self) -> Result<()> {
        self.db.health().await?;
        Ok(())
    }
}

/// 固定 6 位小数的 UTC 时间戳，字符串顺序与时间顺序一致
fn sortable_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 聚合计数结果
#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

/// 文章存储行（不含 id，id 存在记录键里）
#[derive(Debug, Serialize)]
struct PostRow {
    title: String,
    content: String,
    excerpt: String,
    category: Category,
    image_url: String,
    author_id: String,
    created_at: String,
}

/// 被删除的行，只关心是否存在
#[derive(Debug, Deserialize)]
struct DeletedRow {
    #[allow(dead_code)]
    id: RecordId,
}

/// 只更新可编辑字段
#[derive(Debug, Serialize)]
struct PostPatch {
    title: String,
    content: String,
    excerpt: String,
    category: Category,
    image_url: String,
    author_id: String,
}

impl From<&PostDraft> for PostPatch {
    fn from(draft: &PostDraft) -> Self {
        Self {
            title: draft.title.clone(),
            content: draft.content.clone(),
            excerpt: draft.excerpt.clone(),
            category: draft.category,
            image_url: draft.image_url.clone(),
            author_id: draft.author_id.clone(),
        }
    }
}

/// 去掉 id 字段，id 由记录键承载
fn without_id<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    let mut json = serde_json::to_value(value)?;
    if let Some(object) = json.as_object_mut() {
        object.remove("id");
    }
    Ok(json)
}

async fn count_table(pool: &SurrealPool, table: &'static str) -> Result<u64> {
    let row: Option<CountRow> = pool
        .inner()
        .query("SELECT count() AS count FROM type::table($table) GROUP ALL")
        .bind(("table", table))
        .await?
        .take(0)?;
    Ok(row.map(|r| r.count).unwrap_or(0))
}

/// 文章仓储实现
#[derive(Clone)]
pub struct SurrealPostRepository {
    pool: SurrealPool,
}

impl SurrealPostRepository {
    pub fn new(pool: SurrealPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for SurrealPostRepository {
    async fn insert(&self, draft: &PostDraft) -> Result<Post> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();
        let row = PostRow {
            title: draft.title.clone(),
            content: draft.content.clone(),
            excerpt: draft.excerpt.clone(),
            category: draft.category,
            image_url: draft.image_url.clone(),
            author_id: draft.author_id.clone(),
            created_at: sortable_timestamp(created_at),
        };

        self.pool
            .inner()
            .query("CREATE type::thing($table, $id) CONTENT $row RETURN NONE")
            .bind(("table", POSTS_TABLE))
            .bind(("id", id.clone()))
            .bind(("row", row))
            .await?
            .check()?;

        tracing::debug!(post_id = %id, "post row created");
        Ok(Post::from_draft(id, draft.clone(), created_at))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Post>> {
        let post: Option<Post> = self
            .pool
            .inner()
            .query("SELECT *, record::id(id) AS id FROM type::thing($table, $id)")
            .bind(("table", POSTS_TABLE))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(post)
    }

    async fn update(&self, id: &str, draft: &PostDraft) -> Result<Option<Post>> {
        let updated: Vec<Post> = self
            .pool
            .inner()
            .query(UPDATE_POST)
            .bind(("table", POSTS_TABLE))
            .bind(("id", id.to_string()))
            .bind(("patch", PostPatch::from(draft)))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let deleted: Vec<DeletedRow> = self
            .pool
            .inner()
            .query(DELETE_POST)
            .bind(("table", POSTS_TABLE))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(!deleted.is_empty())
    }

    async fn list_recent(&self) -> Result<Vec<Post>> {
        let posts: Vec<Post> = self
            .pool
            .inner()
            .query(LIST_POSTS)
            .bind(("table", POSTS_TABLE))
            .await?
            .take(0)?;
        Ok(posts)
    }

    async fn count(&self) -> Result<u64> {
        count_table(&self.pool, POSTS_TABLE).await
    }
}

/// 用户资料仓储实现
#[derive(Clone)]
pub struct SurrealProfileRepository {
    pool: SurrealPool,
}

impl SurrealProfileRepository {
    pub fn new(pool: SurrealPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for SurrealProfileRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<Profile>> {
        let profile: Option<Profile> = self
            .pool
            .inner()
            .query("SELECT *, record::id(id) AS id FROM type::thing($table, $id)")
            .bind(("table", PROFILES_TABLE))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(profile)
    }

    async fn count(&self) -> Result<u64> {
        count_table(&self.pool, PROFILES_TABLE).await
    }
}

/// 问诊历史仓储实现
#[derive(Clone)]
pub struct SurrealDiagnosisHistoryRepository {
    pool: SurrealPool,
}

impl SurrealDiagnosisHistoryRepository {
    pub fn new(pool: SurrealPool) -> Self {
        Self { pool }
    }

    async fn write(&self, statement: &'static str, record: &DiagnosisHistoryRecord) -> Result<String> {
        self.pool
            .inner()
            .query(statement)
            .bind(("table", DIAGNOSIS_HISTORY_TABLE))
            .bind(("id", record.id.clone()))
            .bind(("row", without_id(record)?))
            .await?
            .check()?;
        Ok(record.id.clone())
    }
}

#[async_trait]
impl DiagnosisHistoryRepository for SurrealDiagnosisHistoryRepository {
    async fn insert(&self, record: &DiagnosisHistoryRecord) -> Result<String> {
        self.write(INSERT_HISTORY, record).await
    }

    async fn upsert(&self, record: &DiagnosisHistoryRecord) -> Result<String> {
        self.write(UPSERT_HISTORY, record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_id_strips_key() {
        let record = DiagnosisHistoryRecord {
            id: "abc".into(),
            user_id: "u".into(),
            condition: "c".into(),
            symptoms: "s".into(),
            severity: "v".into(),
            duration: "d".into(),
            confidence: 0.5,
            recommendations: "r".into(),
            created_at: Utc::now(),
        };
        let row = without_id(&record).unwrap();
        assert!(row.get("id").is_none());
        assert_eq!(row["user_id"], "u");
    }

    #[test]
    fn test_post_row_serializes_category_label() {
        let row = PostRow {
            title: "t".into(),
            content: "c".into(),
            excerpt: "e".into(),
            category: Category::FirstAid,
            image_url: "i".into(),
            author_id: "a".into(),
            created_at: sortable_timestamp(Utc::now()),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["category"], "First Aid");
    }

    #[test]
    fn test_sortable_timestamp_orders_within_same_second() {
        let earlier = DateTime::parse_from_rfc3339("2024-03-01T10:00:00.100Z")
            .unwrap()
            .with_timezone(&Utc);
        let later = earlier + chrono::Duration::microseconds(500);

        let (a, b) = (sortable_timestamp(earlier), sortable_timestamp(later));
        assert_eq!(a, "2024-03-01T10:00:00.100000Z");
        assert!(b > a);
        assert_eq!(DateTime::parse_from_rfc3339(&b).unwrap(), later);
    }

    #[test]
    fn test_post_writes_are_single_statements() {
        for statement in [UPDATE_POST, DELETE_POST] {
            assert!(!statement.contains(';'));
        }
        assert!(UPDATE_POST.contains("RETURN *"));
        assert!(DELETE_POST.ends_with("RETURN BEFORE"));
    }

    #[test]
    fn test_history_upsert_keeps_created_at() {
        assert!(UPSERT_HISTORY.contains("created_at = created_at ?? $row.created_at"));
        assert!(!UPSERT_HISTORY.contains("CONTENT"));
    }
}
