//! Domain models for the booking cache.

pub mod booking;
pub mod config;
pub mod envelope;

pub use booking::{Booking, Location, OriginAndDestinationPair, Segment};
pub use config::{CacheConfig, Config, DatabaseConfig, LoggingConfig, UpstreamConfig};
pub use envelope::{CacheEnvelope, FetchResult};
