//! 进程内存储
//!
//! 用于开发环境和测试，三张表各用一个 DashMap。

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::error::Result;
use crate::models::diagnosis::DiagnosisHistoryRecord;
use crate::models::post::{Post, PostDraft};
use crate::models::profile::Profile;
use crate::storage::repository::{DiagnosisHistoryRepository, PostRepository, ProfileRepository};

/// 进程内存储
#[derive(Default)]
pub struct MemoryStore {
    /// id -> (插入序号, 文章)；序号用于同一时刻创建的文章排序
    posts: DashMap<String, (u64, Post)>,
    profiles: DashMap<String, Profile>,
    history: DashMap<String, DiagnosisHistoryRecord>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入用户资料（资料由外部维护，这里只用于初始化）
    pub fn seed_profile(&self, profile: Profile) {
        self.profiles.insert(profile.id.clone(), profile);
    }

    /// 某个用户的历史记录
    pub fn history_for(&self, user_id: &str) -> Vec<DiagnosisHistoryRecord> {
        self.history
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn insert(&self, draft: &PostDraft) -> Result<Post> {
        let post = Post::from_draft(Uuid::new_v4().to_string(), draft.clone(), Utc::now());
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        self.posts.insert(post.id.clone(), (seq, post.clone()));
        Ok(post)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Post>> {
        Ok(self.posts.get(id).map(|entry| entry.value().1.clone()))
    }

    async fn update(&self, id: &str, draft: &PostDraft) -> Result<Option<Post>> {
        Ok(self.posts.get_mut(id).map(|mut entry| {
            entry.value_mut().1.overwrite(draft.clone());
            entry.value().1.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.posts.remove(id).is_some())
    }

    async fn list_recent(&self) -> Result<Vec<Post>> {
        let mut rows: Vec<(u64, Post)> = self
            .posts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });
        Ok(rows.into_iter().map(|(_, post)| post).collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.posts.len() as u64)
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<Profile>> {
        Ok(self.profiles.get(id).map(|entry| entry.value().clone()))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.profiles.len() as u64)
    }
}

#[async_trait]
impl DiagnosisHistoryRepository for MemoryStore {
    async fn insert(&self, record: &DiagnosisHistoryRecord) -> Result<String> {
        // 不做去重：同一 ID 再次插入会覆盖，但 ID 每次都由调用方新生成
        self.history.insert(record.id.clone(), record.clone());
        Ok(record.id.clone())
    }

    async fn upsert(&self, record: &DiagnosisHistoryRecord) -> Result<String> {
        self.history
            .entry(record.id.clone())
            .and_modify(|existing| {
                let created_at = existing.created_at;
                *existing = record.clone();
                existing.created_at = created_at;
            })
            .or_insert_with(|| record.clone());
        Ok(record.id.clone())
    }
}
