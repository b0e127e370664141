//! Persistent cache for the booking envelope.
//!
//! Wraps a [`KeyValueStore`] and stores exactly one envelope under a fixed
//! key. This layer owns the cache TTL clock only; the booking's own expiry
//! stamp is evaluated by [`crate::domain::expiry`]. There is deliberately no
//! in-memory caching here: coordination state lives with the orchestrator.

use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use crate::domain::errors::BookingResult;
use crate::domain::models::{Booking, CacheConfig, CacheEnvelope};
use crate::domain::ports::KeyValueStore;

pub struct BookingCache {
    store: Arc<dyn KeyValueStore>,
    key: String,
    ttl_ms: i64,
}

impl BookingCache {
    pub fn new(store: Arc<dyn KeyValueStore>, config: &CacheConfig) -> Self {
        Self {
            store,
            key: config.key.clone(),
            ttl_ms: config.ttl_ms,
        }
    }

    /// Persist a booking, wrapping it in an envelope stamped with the
    /// configured TTL. Overwrites any previous envelope.
    pub async fn save(&self, booking: &Booking) -> BookingResult<CacheEnvelope> {
        let now_ms = Utc::now().timestamp_millis();
        let envelope = CacheEnvelope {
            data: booking.clone(),
            cached_at: now_ms,
            expiry_time: now_ms + self.ttl_ms,
        };

        let serialized = serde_json::to_string(&envelope)?;
        self.store.set(&self.key, &serialized).await?;
        debug!(key = %self.key, ttl_ms = self.ttl_ms, "cached booking envelope");

        Ok(envelope)
    }

    /// Load the cached envelope. Absence is `Ok(None)`; only I/O and parse
    /// failures are errors.
    pub async fn load(&self) -> BookingResult<Option<CacheEnvelope>> {
        let Some(serialized) = self.store.get(&self.key).await? else {
            return Ok(None);
        };

        let envelope: CacheEnvelope = serde_json::from_str(&serialized)?;
        Ok(Some(envelope))
    }

    /// Remove the cached envelope.
    pub async fn clear(&self) -> BookingResult<()> {
        self.store.remove(&self.key).await
    }

    /// Whether the envelope's TTL has elapsed.
    pub fn is_stale(&self, envelope: &CacheEnvelope) -> bool {
        envelope.is_stale_at(Utc::now().timestamp_millis())
    }
}
