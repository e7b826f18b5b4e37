use crate::config::config::{AppConfig, StorageBackend};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀，`__` 分隔嵌套字段，如 `CAREDESK_SERVER__PORT`
pub const ENV_PREFIX: &str = "CAREDESK_";

/// JWT 密钥最小长度
const MIN_JWT_SECRET_LEN: usize = 32;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（高到低）：
    /// 1. 环境变量
    /// 2. ./config.toml
    /// 3. 内置开发配置
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::figment(&default_config_path()).extract()
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Self::figment(&path).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.database.backend == StorageBackend::Surrealdb && config.database.url.is_empty() {
            return Err(ConfigValidationError::MissingDatabaseUrl);
        }

        if config.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigValidationError::WeakJwtSecret(MIN_JWT_SECRET_LEN));
        }

        if let Some(url) = &config.backend.api_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigValidationError::InvalidApiUrl(url.clone()));
            }
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("数据库连接 URL 未配置")]
    MissingDatabaseUrl,

    #[error("JWT 密钥长度不足，至少需要 {0} 个字符")]
    WeakJwtSecret(usize),

    #[error("后端 API 地址无效: {0}")]
    InvalidApiUrl(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}
