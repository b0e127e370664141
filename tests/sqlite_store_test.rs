//! Integration tests for the SQLite-backed key-value store, including
//! durability across pool reopen and end-to-end use under the orchestrator.

use std::sync::Arc;

use purser::adapters::sqlite::{create_pool, SqliteKeyValueStore};
use purser::adapters::MockBookingSource;
use purser::domain::models::{Config, DatabaseConfig};
use purser::services::BookingDataService;
use purser::KeyValueStore;

fn database_config(dir: &tempfile::TempDir) -> DatabaseConfig {
    DatabaseConfig {
        path: dir
            .path()
            .join("purser.db")
            .to_string_lossy()
            .into_owned(),
        max_connections: 2,
    }
}

#[tokio::test]
async fn values_survive_a_pool_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = database_config(&dir);

    {
        let pool = create_pool(&config).await.unwrap();
        let store = SqliteKeyValueStore::new(pool.clone());
        store.ensure_schema().await.unwrap();
        store.set("booking_data_cache", "payload").await.unwrap();
        pool.close().await;
    }

    let pool = create_pool(&config).await.unwrap();
    let store = SqliteKeyValueStore::new(pool);
    store.ensure_schema().await.unwrap();
    assert_eq!(
        store.get("booking_data_cache").await.unwrap(),
        Some("payload".to_string())
    );
}

#[tokio::test]
async fn orchestrator_round_trips_through_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let pool = create_pool(&database_config(&dir)).await.unwrap();
    let store = SqliteKeyValueStore::new(pool);
    store.ensure_schema().await.unwrap();

    let source = Arc::new(MockBookingSource::succeeding());
    let mut config = Config::default();
    config.upstream.base_delay_ms = 1;

    let service = BookingDataService::new(Arc::new(store), source.clone(), &config);

    // First read fetches and persists.
    let fetched = service.get_data(false).await;
    assert!(!fetched.is_from_cache);
    assert!(fetched.error.is_none());

    // Second read is served from the durable cache.
    let cached = service.get_data(false).await;
    assert!(cached.is_from_cache);
    assert_eq!(cached.data, fetched.data);
    assert_eq!(source.call_count(), 1);
}
