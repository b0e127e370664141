//! Cache envelope and read-result models.

use serde::{Deserialize, Serialize};

use super::booking::Booking;
use crate::domain::errors::BookingError;

/// What gets persisted in the key-value store: the booking plus the cache
/// clock. `expiry_time` here is the cache TTL deadline (milliseconds), not
/// the booking's own server-declared expiry; the two are independent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEnvelope {
    pub data: Booking,
    /// Unix milliseconds at write time.
    pub cached_at: i64,
    /// Unix milliseconds after which the envelope is TTL-stale.
    pub expiry_time: i64,
}

impl CacheEnvelope {
    /// True once the cache TTL has elapsed, judged against `now_ms`.
    pub fn is_stale_at(&self, now_ms: i64) -> bool {
        now_ms > self.expiry_time
    }
}

/// Outcome of a read through the orchestrator.
///
/// `data` is `None` only when the fetch failed *and* no fallback envelope
/// existed; a degraded read carries both the stale data and the error.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub data: Option<Booking>,
    pub error: Option<BookingError>,
    pub is_from_cache: bool,
}

impl FetchResult {
    /// A successful fetch straight from upstream.
    pub fn fresh(booking: Booking) -> Self {
        Self {
            data: Some(booking),
            error: None,
            is_from_cache: false,
        }
    }

    /// A cache hit, no upstream involved.
    pub fn from_cache(booking: Booking) -> Self {
        Self {
            data: Some(booking),
            error: None,
            is_from_cache: true,
        }
    }

    /// A failed fetch degraded to the most recent cached booking.
    pub fn degraded(booking: Booking, error: BookingError) -> Self {
        Self {
            data: Some(booking),
            error: Some(error),
            is_from_cache: true,
        }
    }

    /// A failed fetch with no fallback of any kind.
    pub fn failed(error: BookingError) -> Self {
        Self {
            data: None,
            error: Some(error),
            is_from_cache: false,
        }
    }
}
