//! Upstream fetch service: bounded linear-backoff retry and expiry stamping.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::errors::{BookingError, BookingResult};
use crate::domain::models::{Booking, UpstreamConfig};
use crate::domain::ports::BookingSource;

/// Bounded retry with linear backoff.
///
/// Retry *n* waits `base_delay * n` before running. This is the upstream
/// fetch policy; it is not the exponential delay hint surfaced to callers by
/// [`BookingError::suggested_retry_delay`], and the two must not be mixed up.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    max_retries: u32,
    /// Base delay multiplied by the retry number.
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay inserted before retry `retry_number` (1-based).
    fn backoff(&self, retry_number: u32) -> Duration {
        self.base_delay.saturating_mul(retry_number)
    }

    /// Run `operation` until it succeeds, fails terminally, or retries are
    /// exhausted. Only retryable errors (network, service-unavailable) are
    /// retried. The terminal error reports the total attempt count.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> BookingResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = BookingResult<T>>,
    {
        let mut retries_used = 0;

        loop {
            match operation().await {
                Ok(value) => {
                    if retries_used > 0 {
                        debug!(retries = retries_used, "fetch succeeded after retrying");
                    }
                    return Ok(value);
                }
                Err(err) if err.is_retryable() && retries_used < self.max_retries => {
                    retries_used += 1;
                    let delay = self.backoff(retries_used);
                    warn!(
                        retry = retries_used,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "fetch attempt failed, retrying"
                    );
                    sleep(delay).await;
                }
                Err(err) => {
                    if err.is_retryable() {
                        return Err(BookingError::retries_exhausted(retries_used + 1, err));
                    }
                    debug!(error = %err, "terminal fetch error, not retrying");
                    return Err(err);
                }
            }
        }
    }
}

/// How a freshly fetched booking gets its domain expiry stamp.
#[derive(Debug, Clone)]
pub enum ExpiryMode {
    /// Stamp `now + default_expiry_secs`; used by caller-initiated fetches.
    Restamp,
    /// Keep the given prior stamp (wire format, Unix seconds). Background
    /// refresh uses this so picking up content changes does not reset the
    /// domain countdown.
    Preserve(String),
}

/// Fetches bookings through a [`BookingSource`] with retry, stamps their
/// expiry, and tracks the last successful fetch.
pub struct UpstreamService {
    source: Arc<dyn BookingSource>,
    retry: RetryPolicy,
    default_expiry_secs: i64,
    last_success: Mutex<Option<DateTime<Utc>>>,
}

impl UpstreamService {
    pub fn new(source: Arc<dyn BookingSource>, config: &UpstreamConfig) -> Self {
        Self {
            source,
            retry: RetryPolicy::new(
                config.max_retries,
                Duration::from_millis(config.base_delay_ms),
            ),
            default_expiry_secs: config.default_expiry_secs,
            last_success: Mutex::new(None),
        }
    }

    /// Fetch a booking with retry and stamp its expiry per `mode`.
    pub async fn fetch(&self, mode: ExpiryMode) -> BookingResult<Booking> {
        let source = Arc::clone(&self.source);
        let raw = self.retry.execute(|| {
            let source = Arc::clone(&source);
            async move { source.fetch().await }
        })
        .await?;

        *self.last_success.lock().await = Some(Utc::now());

        let booking = match mode {
            ExpiryMode::Restamp => {
                raw.with_expiry_secs(Utc::now().timestamp() + self.default_expiry_secs)
            }
            ExpiryMode::Preserve(prior_stamp) => {
                let mut booking = raw;
                booking.expiry_time = prior_stamp;
                booking
            }
        };

        Ok(booking)
    }

    /// When the last successful upstream fetch completed, if any.
    pub async fn last_success(&self) -> Option<DateTime<Utc>> {
        *self.last_success.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::upstream::MockBookingSource;
    use crate::domain::models::UpstreamConfig;

    fn fast_config() -> UpstreamConfig {
        UpstreamConfig {
            max_retries: 3,
            base_delay_ms: 1,
            ..UpstreamConfig::default()
        }
    }

    #[test]
    fn backoff_grows_linearly() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1000));
        assert_eq!(policy.backoff(1), Duration::from_millis(1000));
        assert_eq!(policy.backoff(2), Duration::from_millis(2000));
        assert_eq!(policy.backoff(3), Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn retries_then_succeeds() {
        let source = Arc::new(MockBookingSource::succeeding());
        source
            .push_response(Err(BookingError::Network("reset".to_string())))
            .await;
        source
            .push_response(Err(BookingError::ServiceUnavailable("503".to_string())))
            .await;

        let service = UpstreamService::new(source.clone(), &fast_config());
        let booking = service.fetch(ExpiryMode::Restamp).await.unwrap();

        assert_eq!(booking.ship_reference, "ABCDEF");
        assert_eq!(source.call_count(), 3);
        assert!(service.last_success().await.is_some());
    }

    #[tokio::test]
    async fn exhaustion_reports_attempt_count() {
        let source = Arc::new(MockBookingSource::failing());
        let service = UpstreamService::new(source.clone(), &fast_config());

        let err = service.fetch(ExpiryMode::Restamp).await.unwrap_err();
        match err {
            BookingError::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 4),
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
        // initial attempt + 3 retries
        assert_eq!(source.call_count(), 4);
        assert!(service.last_success().await.is_none());
    }

    #[tokio::test]
    async fn terminal_errors_are_not_retried() {
        let source = Arc::new(MockBookingSource::with_default(Err(BookingError::Unknown(
            "400".to_string(),
        ))));
        let service = UpstreamService::new(source.clone(), &fast_config());

        let err = service.fetch(ExpiryMode::Restamp).await.unwrap_err();
        assert!(matches!(err, BookingError::Unknown(_)));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn restamp_assigns_a_future_expiry() {
        let source = Arc::new(MockBookingSource::succeeding());
        let service = UpstreamService::new(source, &fast_config());

        let before = Utc::now().timestamp();
        let booking = service.fetch(ExpiryMode::Restamp).await.unwrap();
        let stamp = booking.expiry_epoch_secs().unwrap();

        assert!(stamp >= before + 3600);
        assert!(stamp <= Utc::now().timestamp() + 3600);
    }

    #[tokio::test]
    async fn preserve_keeps_the_prior_stamp() {
        let source = Arc::new(MockBookingSource::succeeding());
        let service = UpstreamService::new(source, &fast_config());

        let booking = service
            .fetch(ExpiryMode::Preserve("1234567890".to_string()))
            .await
            .unwrap();
        assert_eq!(booking.expiry_time, "1234567890");
    }
}
