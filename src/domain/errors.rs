//! Domain errors for the booking cache.
//!
//! Errors are `Clone` so that callers joined onto a single in-flight fetch
//! can all receive the same failure. Every error maps to a stable
//! classification with a fixed user-facing message, so presentation code
//! renders consistent guidance instead of raw error text.

use std::time::Duration;
use thiserror::Error;

/// Upper bound on the caller-level retry hint.
const MAX_CALLER_RETRY_DELAY_MS: u64 = 10_000;

/// Errors surfaced by the booking data layer.
#[derive(Debug, Clone, Error)]
pub enum BookingError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Data expired: {0}")]
    DataExpired(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Upstream fetch failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<BookingError>,
    },
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Stable error classification exposed to presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClassification {
    Network,
    Store,
    DataExpired,
    ServiceUnavailable,
    Unknown,
}

impl BookingError {
    /// Wrap a terminal retry failure, recording how many attempts were made.
    pub fn retries_exhausted(attempts: u32, source: BookingError) -> Self {
        Self::RetriesExhausted {
            attempts,
            source: Box::new(source),
        }
    }

    /// Classification of this error. A retry-exhaustion wrapper classifies
    /// as whatever its underlying failure was.
    pub fn classification(&self) -> ErrorClassification {
        match self {
            Self::Network(_) => ErrorClassification::Network,
            Self::Store(_) => ErrorClassification::Store,
            Self::DataExpired(_) => ErrorClassification::DataExpired,
            Self::ServiceUnavailable(_) => ErrorClassification::ServiceUnavailable,
            Self::Unknown(_) => ErrorClassification::Unknown,
            Self::RetriesExhausted { source, .. } => source.classification(),
        }
    }

    /// Stable human-readable guidance keyed by classification.
    pub fn user_message(&self) -> &'static str {
        match self.classification() {
            ErrorClassification::Network => {
                "Network connection failed. Check your connection and try again."
            }
            ErrorClassification::Store => {
                "Cached data could not be read. The data may need to be reloaded."
            }
            ErrorClassification::DataExpired => {
                "This booking has expired. Refresh to get the latest information."
            }
            ErrorClassification::ServiceUnavailable => {
                "The booking service is temporarily unavailable. Try again shortly."
            }
            ErrorClassification::Unknown => "An unexpected error occurred.",
        }
    }

    /// Whether a caller-level retry is worthwhile.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.classification(),
            ErrorClassification::Network | ErrorClassification::ServiceUnavailable
        )
    }

    /// Suggested caller-level retry delay: `min(1000 * 2^attempt, 10_000)` ms.
    ///
    /// This exponential hint is for retry UI at the call site. It is distinct
    /// from the linear backoff the upstream service applies internally.
    pub fn suggested_retry_delay(attempt: u32) -> Duration {
        let delay_ms = 1000_u64
            .saturating_mul(2_u64.saturating_pow(attempt))
            .min(MAX_CALLER_RETRY_DELAY_MS);
        Duration::from_millis(delay_ms)
    }
}

impl From<sqlx::Error> for BookingError {
    fn from(err: sqlx::Error) -> Self {
        BookingError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retries_exhausted_classifies_as_its_source() {
        let err = BookingError::retries_exhausted(4, BookingError::Network("refused".to_string()));
        assert_eq!(err.classification(), ErrorClassification::Network);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("4 attempts"));
    }

    #[test]
    fn only_network_and_unavailable_are_retryable() {
        assert!(BookingError::Network("x".to_string()).is_retryable());
        assert!(BookingError::ServiceUnavailable("x".to_string()).is_retryable());
        assert!(!BookingError::Store("x".to_string()).is_retryable());
        assert!(!BookingError::DataExpired("x".to_string()).is_retryable());
        assert!(!BookingError::Unknown("x".to_string()).is_retryable());
    }

    #[test]
    fn caller_retry_delay_doubles_and_caps() {
        assert_eq!(
            BookingError::suggested_retry_delay(0),
            Duration::from_millis(1000)
        );
        assert_eq!(
            BookingError::suggested_retry_delay(1),
            Duration::from_millis(2000)
        );
        assert_eq!(
            BookingError::suggested_retry_delay(3),
            Duration::from_millis(8000)
        );
        assert_eq!(
            BookingError::suggested_retry_delay(4),
            Duration::from_millis(10_000)
        );
        assert_eq!(
            BookingError::suggested_retry_delay(10),
            Duration::from_millis(10_000)
        );
    }

    #[test]
    fn user_messages_are_keyed_by_classification() {
        let a = BookingError::Network("connection reset by peer".to_string());
        let b = BookingError::Network("dns lookup failed".to_string());
        assert_eq!(a.user_message(), b.user_message());
    }
}
