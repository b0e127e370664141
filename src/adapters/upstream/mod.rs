//! BookingSource implementations.

pub mod http;
pub mod mock;

pub use http::HttpBookingSource;
pub use mock::MockBookingSource;
