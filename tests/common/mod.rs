//! Shared helpers for integration tests.

use std::sync::Arc;

use purser::adapters::{InMemoryKeyValueStore, MockBookingSource};
use purser::domain::models::{CacheEnvelope, Config};
use purser::services::BookingDataService;
use purser::Booking;

/// Config with fast retries so failure paths finish quickly.
pub fn test_config(ttl_ms: i64) -> Config {
    let mut config = Config::default();
    config.cache.ttl_ms = ttl_ms;
    config.upstream.max_retries = 2;
    config.upstream.base_delay_ms = 1;
    config
}

/// Wire a service over shared in-memory store and mock source handles.
pub fn build_service(
    store: &Arc<InMemoryKeyValueStore>,
    source: &Arc<MockBookingSource>,
    config: &Config,
) -> BookingDataService {
    BookingDataService::new(
        Arc::clone(store) as Arc<dyn purser::KeyValueStore>,
        Arc::clone(source) as Arc<dyn purser::BookingSource>,
        config,
    )
}

/// Write an envelope directly into the store, bypassing the cache layer,
/// so tests can stage arbitrary cache states.
pub async fn seed_envelope(
    store: &InMemoryKeyValueStore,
    booking: &Booking,
    cached_at: i64,
    expiry_time: i64,
) {
    let envelope = CacheEnvelope {
        data: booking.clone(),
        cached_at,
        expiry_time,
    };
    let serialized = serde_json::to_string(&envelope).unwrap();
    purser::KeyValueStore::set(store, "booking_data_cache", &serialized)
        .await
        .unwrap();
}

/// Read the persisted envelope back out of the raw store.
pub async fn stored_envelope(store: &InMemoryKeyValueStore) -> Option<CacheEnvelope> {
    let raw = purser::KeyValueStore::get(store, "booking_data_cache")
        .await
        .unwrap()?;
    Some(serde_json::from_str(&raw).unwrap())
}
