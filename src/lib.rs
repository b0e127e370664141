//! Purser - Staleness-Aware Booking Data Cache
//!
//! Purser fetches a perishable booking document from an unreliable upstream
//! source, caches it durably with a TTL, and serves stale-but-usable data
//! while refreshing in the background. Concurrent readers never trigger
//! duplicate upstream fetches, and a failing upstream degrades to the most
//! recent cached data instead of failing the caller.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, expiry arithmetic, segment
//!   merging, error taxonomy, and ports
//! - **Service Layer** (`services`): Cache store, upstream retry, and the
//!   orchestrator
//! - **Adapters** (`adapters`): SQLite and in-memory key-value stores, HTTP
//!   and mock booking sources
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use purser::adapters::{HttpBookingSource, SqliteKeyValueStore};
//! use purser::infrastructure::ConfigLoader;
//! use purser::services::BookingDataService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let pool = purser::adapters::sqlite::create_pool(&config.database).await?;
//!     let store = SqliteKeyValueStore::new(pool);
//!     store.ensure_schema().await?;
//!     let source = HttpBookingSource::new(&config.upstream)?;
//!
//!     let service = BookingDataService::new(Arc::new(store), Arc::new(source), &config);
//!     let result = service.get_data(false).await;
//!     println!("{:?}", result.data);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{BookingError, BookingResult, ErrorClassification};
pub use domain::expiry::{evaluate, format_time_until_expiry, should_refresh, ExpiryInfo};
pub use domain::models::{
    Booking, CacheConfig, CacheEnvelope, Config, DatabaseConfig, FetchResult, Location,
    LoggingConfig, OriginAndDestinationPair, Segment, UpstreamConfig,
};
pub use domain::ports::{BookingSource, KeyValueStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{BookingCache, BookingDataService, UpstreamService};
