//! Key-value store port.

use async_trait::async_trait;

use crate::domain::errors::BookingResult;

/// Durable string key-value storage consumed by the cache layer.
///
/// `get` distinguishes "key absent" (`Ok(None)`) from a read failure
/// (`Err`); absence is a normal result, never an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> BookingResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> BookingResult<()>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> BookingResult<()>;
}
