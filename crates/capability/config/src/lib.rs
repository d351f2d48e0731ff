//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 存储后端。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_access_ttl_seconds: u64,
    pub jwt_refresh_ttl_seconds: u64,
    pub default_hotel_id: String,
    pub dashboard_refresh_seconds: u64,
    pub currency: String,
    pub seed_demo_data: bool,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("HMS_JWT_SECRET")
            .map_err(|_| ConfigError::Missing("HMS_JWT_SECRET".to_string()))?;
        let jwt_access_ttl_seconds = read_u64("HMS_JWT_ACCESS_TTL_SECONDS")?;
        let jwt_refresh_ttl_seconds = read_u64("HMS_JWT_REFRESH_TTL_SECONDS")?;
        let http_addr = env::var("HMS_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let storage = read_storage_backend("HMS_STORAGE")?;
        let database_url = read_optional("HMS_DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("HMS_DATABASE_URL".to_string()));
        }
        let default_hotel_id =
            read_optional("HMS_DEFAULT_HOTEL_ID").unwrap_or_else(|| "hotel-1".to_string());
        let dashboard_refresh_seconds = read_u64_with_default("HMS_DASHBOARD_REFRESH_SECONDS", 60)?;
        let currency = read_optional("HMS_CURRENCY")
            .map(|value| value.to_ascii_uppercase())
            .unwrap_or_else(|| "USD".to_string());
        let seed_demo_data = read_bool_with_default("HMS_SEED_DEMO_DATA", true);

        Ok(Self {
            http_addr,
            storage,
            database_url,
            jwt_secret,
            jwt_access_ttl_seconds,
            jwt_refresh_ttl_seconds,
            default_hotel_id,
            dashboard_refresh_seconds,
            currency,
            seed_demo_data,
        })
    }
}

/// 读取 u64 类型环境变量。
fn read_u64(key: &str) -> Result<u64, ConfigError> {
    let value = env::var(key).map_err(|_| ConfigError::Missing(key.to_string()))?;
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_storage_backend(key: &str) -> Result<StorageBackend, ConfigError> {
    let value = match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => return Ok(StorageBackend::Memory),
    };
    match value.to_ascii_lowercase().as_str() {
        "memory" | "in-memory" => Ok(StorageBackend::Memory),
        "postgres" | "pg" => Ok(StorageBackend::Postgres),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
