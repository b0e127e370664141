use serde::{Deserialize, Serialize};

/// Main configuration structure for Purser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Cache TTL and key configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Upstream fetch and retry configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Fixed key the booking envelope is stored under
    #[serde(default = "default_cache_key")]
    pub key: String,

    /// Time-to-live for a cached envelope, in milliseconds
    #[serde(default = "default_cache_ttl_ms")]
    pub ttl_ms: i64,
}

fn default_cache_key() -> String {
    "booking_data_cache".to_string()
}

const fn default_cache_ttl_ms() -> i64 {
    30 * 60 * 1000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key: default_cache_key(),
            ttl_ms: default_cache_ttl_ms(),
        }
    }
}

/// Upstream fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpstreamConfig {
    /// Endpoint serving the booking document
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Additional attempts after the first failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay for linear backoff, in milliseconds (retry n waits n * base)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Lifetime stamped onto a freshly fetched booking, in seconds
    #[serde(default = "default_expiry_secs")]
    pub default_expiry_secs: i64,

    /// Request timeout, in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_endpoint() -> String {
    "http://localhost:8080/booking".to_string()
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_base_delay_ms() -> u64 {
    1000
}

const fn default_expiry_secs() -> i64 {
    3600
}

const fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            default_expiry_secs: default_expiry_secs(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".purser/purser.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
