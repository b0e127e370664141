//! SQLite persistence adapter.

pub mod connection;
pub mod kv_store;

pub use connection::{create_pool, create_test_pool, ConnectionError};
pub use kv_store::SqliteKeyValueStore;
