//! Expiry evaluation for booking records.
//!
//! Pure functions over wall-clock time and a booking's server-declared
//! expiry stamp. This is the *domain* clock; the cache TTL clock lives on
//! [`CacheEnvelope`](crate::domain::models::CacheEnvelope) and is evaluated
//! separately.

use chrono::Utc;

use crate::domain::models::Booking;

/// Window before domain expiry in which a refresh becomes due.
pub const WARNING_WINDOW_MS: i64 = 10 * 60 * 1000;

/// Result of evaluating a booking against the clock.
///
/// `is_near_expiry` is a superset of `is_expired`: a negative remaining
/// lifetime is always inside the warning window. Callers must read
/// "near expiry" as "expired or about to expire", not as a disjoint state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryInfo {
    pub is_expired: bool,
    /// Remaining lifetime in milliseconds; negative once expired.
    pub time_until_expiry_ms: i64,
    pub is_near_expiry: bool,
}

/// Evaluate a booking against the current wall clock.
pub fn evaluate(booking: &Booking) -> ExpiryInfo {
    evaluate_at(booking, Utc::now().timestamp_millis())
}

/// Evaluate a booking against an explicit clock, for deterministic tests.
///
/// A wire stamp that fails to parse is treated as long expired.
pub fn evaluate_at(booking: &Booking, now_ms: i64) -> ExpiryInfo {
    let expiry_ms = booking.expiry_epoch_ms().unwrap_or(i64::MIN);
    let time_until_expiry_ms = expiry_ms.saturating_sub(now_ms);

    ExpiryInfo {
        is_expired: time_until_expiry_ms <= 0,
        time_until_expiry_ms,
        is_near_expiry: time_until_expiry_ms < WARNING_WINDOW_MS,
    }
}

/// True when the booking is expired or inside the warning window. Drives
/// background-refresh scheduling.
pub fn should_refresh(booking: &Booking) -> bool {
    let info = evaluate(booking);
    info.is_expired || info.is_near_expiry
}

/// Render a remaining lifetime for display.
///
/// Zero or negative formats as `"expired"`; otherwise the value is broken
/// down into hours and minutes.
pub fn format_time_until_expiry(time_ms: i64) -> String {
    if time_ms <= 0 {
        return "expired".to_string();
    }

    let minutes = time_ms / (1000 * 60);
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}m until expiry", hours, minutes % 60)
    } else {
        format!("{minutes}m until expiry")
    }
}
