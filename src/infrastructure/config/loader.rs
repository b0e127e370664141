use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cache key cannot be empty")]
    EmptyCacheKey,

    #[error("Invalid cache TTL: {0} ms. Must be positive")]
    InvalidCacheTtl(i64),

    #[error("Upstream endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("Invalid base_delay_ms: {0}. Must be positive")]
    InvalidBaseDelay(u64),

    #[error("Invalid default_expiry_secs: {0}. Must be positive")]
    InvalidDefaultExpiry(i64),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .purser/config.yaml (project config)
    /// 3. .purser/local.yaml (local overrides, optional)
    /// 4. Environment variables (PURSER_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".purser/config.yaml"))
            .merge(Yaml::file(".purser/local.yaml"))
            .merge(Env::prefixed("PURSER_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.cache.key.is_empty() {
            return Err(ConfigError::EmptyCacheKey);
        }
        if config.cache.ttl_ms <= 0 {
            return Err(ConfigError::InvalidCacheTtl(config.cache.ttl_ms));
        }

        if config.upstream.endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if config.upstream.base_delay_ms == 0 {
            return Err(ConfigError::InvalidBaseDelay(config.upstream.base_delay_ms));
        }
        if config.upstream.default_expiry_secs <= 0 {
            return Err(ConfigError::InvalidDefaultExpiry(
                config.upstream.default_expiry_secs,
            ));
        }

        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }
        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
