//! Upstream booking source port.

use async_trait::async_trait;

use crate::domain::errors::BookingResult;
use crate::domain::models::Booking;

/// Transport that fetches one fresh booking document from upstream.
///
/// A single call is one attempt; retry policy lives in the upstream
/// service, not in implementations of this trait. Failures should map to
/// `BookingError::Network` or `BookingError::ServiceUnavailable` when they
/// are worth retrying.
#[async_trait]
pub trait BookingSource: Send + Sync {
    /// Fetch the booking document once.
    async fn fetch(&self) -> BookingResult<Booking>;
}
