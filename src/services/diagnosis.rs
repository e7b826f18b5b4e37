//! 问诊历史服务
//!
//! 把一次问诊结果投影为历史记录并写入存储。每次保存恰好一次存储调用，不重试。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::models::diagnosis::{DiagnosisHistoryRecord, DiagnosisInput, DiagnosisResult};
use crate::models::session::Session;
use crate::storage::repository::DiagnosisHistoryRepository;

/// 保存失败时展示给用户的提示
pub const SAVE_DIAGNOSIS_FAILED: &str = "Gagal menyimpan diagnosis. Silakan coba lagi.";

/// 问诊历史服务 trait
#[async_trait]
pub trait DiagnosisService: Send + Sync {
    /// 保存问诊结果，返回记录 ID
    ///
    /// 提供 `submission_id` 时记录 ID 由用户与提交 ID 确定性生成，
    /// 重复提交只会留下一行；否则每次调用都新增一行。
    async fn save_result(
        &self,
        session: &Session,
        input: &DiagnosisInput,
        result: &DiagnosisResult,
        submission_id: Option<&str>,
    ) -> Result<String>;
}

/// 问诊历史服务实现
pub struct DiagnosisServiceImpl {
    repository: Arc<dyn DiagnosisHistoryRepository>,
}

impl DiagnosisServiceImpl {
    pub fn new(repository: Arc<dyn DiagnosisHistoryRepository>) -> Self {
        Self { repository }
    }
}

/// 由用户与提交 ID 推导记录 ID
pub fn submission_record_id(user_id: &str, submission_id: &str) -> String {
    let name = format!("{}:{}", user_id, submission_id);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

#[async_trait]
impl DiagnosisService for DiagnosisServiceImpl {
    async fn save_result(
        &self,
        session: &Session,
        input: &DiagnosisInput,
        result: &DiagnosisResult,
        submission_id: Option<&str>,
    ) -> Result<String> {
        let saved = match submission_id {
            Some(submission_id) => {
                let id = submission_record_id(&session.user_id, submission_id);
                let record = DiagnosisHistoryRecord::project(id, &session.user_id, input, result);
                self.repository.upsert(&record).await
            }
            None => {
                let id = Uuid::new_v4().to_string();
                let record = DiagnosisHistoryRecord::project(id, &session.user_id, input, result);
                self.repository.insert(&record).await
            }
        };

        let id = saved.map_err(|e| e.user_facing(SAVE_DIAGNOSIS_FAILED))?;
        info!(user_id = %session.user_id, record_id = %id, condition = %result.condition, "Diagnosis saved");
        Ok(id)
    }
}

/// 创建问诊历史服务
pub fn create_diagnosis_service(
    repository: Arc<dyn DiagnosisHistoryRepository>,
) -> Box<dyn DiagnosisService> {
    Box::new(DiagnosisServiceImpl::new(repository))
}
