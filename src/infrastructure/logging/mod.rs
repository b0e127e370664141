//! Logging initialization using tracing.

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

use crate::domain::models::LoggingConfig;

/// Initialize the global tracing subscriber from configuration.
///
/// The configured level acts as the default directive; `RUST_LOG` still
/// overrides it. Call once at startup.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(parse_level(&config.level)?.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    match config.format.as_str() {
        "json" => builder.json().try_init(),
        "pretty" => builder.pretty().try_init(),
        other => bail!("Invalid log format: {other}"),
    }
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}

fn parse_level(level: &str) -> Result<tracing::Level> {
    match level {
        "trace" => Ok(tracing::Level::TRACE),
        "debug" => Ok(tracing::Level::DEBUG),
        "info" => Ok(tracing::Level::INFO),
        "warn" => Ok(tracing::Level::WARN),
        "error" => Ok(tracing::Level::ERROR),
        other => bail!("Invalid log level: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_documented_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(parse_level(level).is_ok());
        }
        assert!(parse_level("verbose").is_err());
    }
}
