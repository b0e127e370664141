//! Adapters for external systems.

pub mod memory;
pub mod sqlite;
pub mod upstream;

pub use memory::InMemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;
pub use upstream::{HttpBookingSource, MockBookingSource};
