//! 应用运行配置加载。

use domain::RuntimeMode;
use std::env;
use std::time::Duration;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 外部数据库访问配置（每个请求独立建池时使用）。
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub runtime_mode: RuntimeMode,
    pub connect_timeout: Duration,
    pub query_timeout: Duration,
    pub managed_tls_markers: Vec<String>,
    pub default_max_role: i32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            runtime_mode: RuntimeMode::Development,
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            query_timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
            managed_tls_markers: split_list(DEFAULT_MANAGED_TLS_MARKERS),
            default_max_role: DEFAULT_MAX_ROLE,
        }
    }
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    /// 本地存储（子账户、公告）；未配置时使用内存存储。
    pub database_url: Option<String>,
    pub remote: RemoteConfig,
}

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_MANAGED_TLS_MARKERS: &str = "neon.tech,neondb,neon";
const DEFAULT_MAX_ROLE: i32 = 6;

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr =
            env::var("GUARD_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let database_url = read_optional("GUARD_DATABASE_URL");
        let runtime_mode = read_optional("GUARD_ENV")
            .map(|value| RuntimeMode::parse(&value))
            .unwrap_or_default();
        let connect_timeout_ms =
            read_u64_with_default("GUARD_REMOTE_CONNECT_TIMEOUT_MS", DEFAULT_CONNECT_TIMEOUT_MS)?;
        let query_timeout_ms =
            read_u64_with_default("GUARD_REMOTE_QUERY_TIMEOUT_MS", DEFAULT_QUERY_TIMEOUT_MS)?;
        if connect_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "GUARD_REMOTE_CONNECT_TIMEOUT_MS".to_string(),
                "0".to_string(),
            ));
        }
        if query_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "GUARD_REMOTE_QUERY_TIMEOUT_MS".to_string(),
                "0".to_string(),
            ));
        }
        let managed_tls_markers = read_optional("GUARD_MANAGED_TLS_MARKERS")
            .map(|value| split_list(&value))
            .unwrap_or_else(|| split_list(DEFAULT_MANAGED_TLS_MARKERS));
        let default_max_role = read_i32_with_default("GUARD_DEFAULT_MAX_ROLE", DEFAULT_MAX_ROLE)?;

        Ok(Self {
            http_addr,
            database_url,
            remote: RemoteConfig {
                runtime_mode,
                connect_timeout: Duration::from_millis(connect_timeout_ms),
                query_timeout: Duration::from_millis(query_timeout_ms),
                managed_tls_markers,
                default_max_role,
            },
        })
    }
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

fn read_i32_with_default(key: &str, default: i32) -> Result<i32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<i32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
