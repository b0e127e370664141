//! Service layer: cache store, upstream fetch, and the orchestrator.

pub mod cache;
pub mod orchestrator;
pub mod upstream;

pub use cache::BookingCache;
pub use orchestrator::BookingDataService;
pub use upstream::{ExpiryMode, RetryPolicy, UpstreamService};
