//! In-memory KeyValueStore for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::errors::{BookingError, BookingResult};
use crate::domain::ports::KeyValueStore;

/// Volatile key-value store with switchable fault injection.
///
/// Read/write failures can be toggled at runtime so orchestration code paths
/// that degrade on store failure can be exercised deterministically.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail with a store error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `set`/`remove` fail with a store error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> BookingResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BookingError::Store("injected read failure".to_string()));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> BookingResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BookingError::Store("injected write failure".to_string()));
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> BookingResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BookingError::Store("injected write failure".to_string()));
        }
        self.entries.write().await.remove(key);
        Ok(())
    }
}
