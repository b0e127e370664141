//! Ports (interfaces) to external collaborators.

pub mod booking_source;
pub mod key_value_store;

pub use booking_source::BookingSource;
pub use key_value_store::KeyValueStore;
