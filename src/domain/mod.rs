//! Domain layer for the booking cache.
//!
//! Pure business logic: models, expiry arithmetic, segment merging, the
//! error taxonomy, and the ports to external collaborators.

pub mod errors;
pub mod expiry;
pub mod merge;
pub mod models;
pub mod ports;

pub use errors::{BookingError, BookingResult, ErrorClassification};
