//! 后端 API 客户端
//!
//! 调用公开 API（`/posts`、`/diagnose`、`/health`）。未配置基础地址时，
//! 问诊请求改用本地英文查表，健康检查返回 unhealthy。

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::api::dto::public_dto::HealthResponse;
use crate::config::config::BackendConfig;
use crate::error::{AppError, Result};
use crate::models::diagnosis::{DiagnosisInput, DiagnosisResult, Locale};
use crate::models::post::Post;
use crate::services::post::{PostPage, PostQuery};
use crate::services::resolver::resolve_in;

/// 后端 API 客户端
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Option<String>,
}

impl BackendClient {
    /// 创建客户端，`base_url` 形如 `http://host:5000/api`
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self { http, base_url })
    }

    /// 由配置创建
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), Duration::from_secs(config.timeout.max(1)))
    }

    /// 是否配置了后端地址
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn url(&self, path: &str) -> Result<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{}{}", base, path))
            .ok_or_else(|| AppError::Config("backend api_url is not configured".into()))
    }

    /// 文章详情地址，id 作为单个路径段编码
    fn post_url(&self, id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.url("/posts")?)
            .map_err(|e| AppError::Config(format!("Invalid backend api_url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config("backend api_url cannot carry a path".into()))?
            .push(id);
        Ok(url)
    }

    /// 分页获取文章
    pub async fn fetch_blog_posts(&self, query: &PostQuery) -> Result<PostPage> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        if let Some(category) = query.category {
            params.push(("category", category.to_string()));
        }
        if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
            params.push(("search", search.clone()));
        }

        let url = self.url("/posts")?;
        debug!("Fetching blog posts from {}", url);

        let page = self
            .http
            .get(url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<PostPage>()
            .await?;
        Ok(page)
    }

    /// 获取单篇文章
    pub async fn fetch_blog_post(&self, id: &str) -> Result<Post> {
        let url = self.post_url(id)?;
        debug!("Fetching blog post from {}", url);

        let response = self.http.get(url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Post not found: {}", id)));
        }

        Ok(response.error_for_status()?.json::<Post>().await?)
    }

    /// 提交问诊；未配置后端时本地查表
    pub async fn submit_diagnosis(&self, input: &DiagnosisInput) -> Result<DiagnosisResult> {
        let Some(base) = self.base_url.as_ref() else {
            warn!("Backend API URL not configured, resolving diagnosis locally");
            return Ok(resolve_in(input, Locale::En));
        };

        let result = self
            .http
            .post(format!("{}/diagnose", base))
            .json(input)
            .send()
            .await?
            .error_for_status()?
            .json::<DiagnosisResult>()
            .await?;
        Ok(result)
    }

    /// 健康检查，从不返回错误
    pub async fn check_api_health(&self) -> HealthResponse {
        let url = match self.url("/health") {
            Ok(url) => url,
            Err(e) => return HealthResponse::unhealthy(e.to_string()),
        };

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => return HealthResponse::unhealthy(e.to_string()),
        };

        if !response.status().is_success() {
            return HealthResponse::unhealthy(format!(
                "API responded with status {}",
                response.status()
            ));
        }

        response
            .json::<HealthResponse>()
            .await
            .unwrap_or_else(|e| HealthResponse::unhealthy(e.to_string()))
    }
}
