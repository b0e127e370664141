//! The booking data orchestrator.
//!
//! Composes the cache, the expiry evaluator, and the upstream service into
//! one read path:
//!
//! - cache hit, TTL-valid, domain-fresh: serve cached
//! - cache hit, TTL-valid, near domain expiry: serve cached and schedule one
//!   background refresh
//! - cache miss, TTL-stale, or forced: synchronous fetch
//! - fetch failure: degrade to the most recent envelope, whatever its age
//!
//! At most one upstream fetch is in flight at any time. Foreground and
//! background fetches share a single flight slot; callers that need a fetch
//! while one is running join its outcome instead of starting another. The
//! fetch runs as a spawned task, so a caller that walks away does not cancel
//! it for the others or stop the eventual cache write.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, warn};

use crate::domain::errors::{BookingError, BookingResult};
use crate::domain::expiry::{self, ExpiryInfo};
use crate::domain::merge::merge_bookings;
use crate::domain::models::{Booking, Config, FetchResult};
use crate::domain::ports::{BookingSource, KeyValueStore};
use crate::services::cache::BookingCache;
use crate::services::upstream::{ExpiryMode, UpstreamService};

/// Handle to the outcome of the single in-flight fetch. Cloned by joiners.
type SharedFetch = Shared<BoxFuture<'static, BookingResult<Booking>>>;

/// Orchestrates reads of the booking record.
///
/// Construct one instance at startup and share it by cloning; clones refer
/// to the same cache and flight slot.
#[derive(Clone)]
pub struct BookingDataService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    cache: BookingCache,
    upstream: UpstreamService,
    /// The single flight slot. `Some` while a fetch task is running.
    inflight: Mutex<Option<SharedFetch>>,
}

impl BookingDataService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn BookingSource>,
        config: &Config,
    ) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                cache: BookingCache::new(store, &config.cache),
                upstream: UpstreamService::new(source, &config.upstream),
                inflight: Mutex::new(None),
            }),
        }
    }

    /// Read the booking record.
    ///
    /// Never fails while any data, fresh or stale, can be produced: upstream
    /// and store failures degrade to the most recent cached envelope with
    /// the error attached. Only a failure with no fallback at all yields a
    /// result without data.
    pub async fn get_data(&self, force_refresh: bool) -> FetchResult {
        if force_refresh {
            return self.fetch_sync().await;
        }

        match self.inner.cache.load().await {
            Ok(Some(envelope)) if !self.inner.cache.is_stale(&envelope) => {
                if expiry::should_refresh(&envelope.data) {
                    debug!("cached booking near domain expiry, scheduling background refresh");
                    self.schedule_background_refresh().await;
                }
                FetchResult::from_cache(envelope.data)
            }
            Ok(_) => {
                debug!("cache miss or TTL-stale envelope, fetching");
                self.fetch_sync().await
            }
            Err(err) => {
                // A broken cache read must not fail the request.
                warn!(error = %err, "cache read failed, treating as miss");
                self.fetch_sync().await
            }
        }
    }

    /// Force a synchronous fetch, bypassing the cache-validity check.
    pub async fn refresh_data(&self) -> FetchResult {
        self.get_data(true).await
    }

    /// Remove the cached envelope. Write failures propagate.
    pub async fn clear_cache(&self) -> BookingResult<()> {
        self.inner.cache.clear().await
    }

    /// Evaluate a booking's domain expiry.
    pub fn expiry_info(&self, booking: &Booking) -> ExpiryInfo {
        expiry::evaluate(booking)
    }

    /// When the last successful upstream fetch completed, if any.
    pub async fn last_successful_fetch(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.inner.upstream.last_success().await
    }

    /// Synchronous fetch with fallback to the most recent envelope.
    async fn fetch_sync(&self) -> FetchResult {
        match self.join_or_start_fetch(false).await {
            Ok(booking) => FetchResult::fresh(booking),
            Err(err) => {
                warn!(error = %err, "fetch failed, falling back to cached envelope");
                match self.inner.cache.load().await {
                    // Any envelope will do here, TTL-stale included.
                    Ok(Some(envelope)) => FetchResult::degraded(envelope.data, err),
                    _ => FetchResult::failed(err),
                }
            }
        }
    }

    /// Join the in-flight fetch if one exists, otherwise start one.
    async fn join_or_start_fetch(&self, preserve_expiry: bool) -> BookingResult<Booking> {
        let shared = {
            let mut slot = self.inner.inflight.lock().await;
            match slot.as_ref() {
                Some(existing) => {
                    debug!("joining in-flight fetch");
                    existing.clone()
                }
                None => ServiceInner::start_fetch(&self.inner, preserve_expiry, &mut slot),
            }
        };
        shared.await
    }

    /// Schedule a fire-and-forget refresh. A no-op while any fetch is in
    /// flight, which coalesces refreshes to at most one outstanding.
    async fn schedule_background_refresh(&self) {
        let mut slot = self.inner.inflight.lock().await;
        if slot.is_some() {
            debug!("fetch already in flight, skipping background refresh");
            return;
        }

        let shared = ServiceInner::start_fetch(&self.inner, true, &mut slot);
        drop(slot);

        // The triggering caller already got its response; failures here are
        // reported in the log only.
        tokio::spawn(async move {
            if let Err(err) = shared.await {
                warn!(error = %err, "background refresh failed");
            }
        });
    }
}

impl ServiceInner {
    /// Spawn the fetch task and install its shared handle in the slot.
    ///
    /// The slot is cleared by the task itself before the result is
    /// delivered, so a later caller can always start a new fetch once this
    /// outcome is observable.
    fn start_fetch(
        inner: &Arc<ServiceInner>,
        preserve_expiry: bool,
        slot: &mut Option<SharedFetch>,
    ) -> SharedFetch {
        let (result_tx, result_rx) = oneshot::channel();
        let task_inner = Arc::clone(inner);

        tokio::spawn(async move {
            let result = task_inner.run_fetch(preserve_expiry).await;
            task_inner.inflight.lock().await.take();
            // Joiners may all have gone away; that is fine.
            let _ = result_tx.send(result);
        });

        let shared: SharedFetch = result_rx
            .map(|received| match received {
                Ok(outcome) => outcome,
                Err(_) => Err(BookingError::Unknown("fetch task was aborted".to_string())),
            })
            .boxed()
            .shared();

        *slot = Some(shared.clone());
        shared
    }

    /// One full fetch cycle: retrying fetch, expiry stamping, merge with a
    /// still-valid cached record, persist.
    async fn run_fetch(&self, preserve_expiry: bool) -> BookingResult<Booking> {
        // Read errors here must not abort the fetch; they only cost us the
        // prior stamp and the merge input.
        let prior = self.cache.load().await.ok().flatten();

        let mode = if preserve_expiry {
            match &prior {
                Some(envelope) => ExpiryMode::Preserve(envelope.data.expiry_time.clone()),
                None => ExpiryMode::Restamp,
            }
        } else {
            ExpiryMode::Restamp
        };

        let fresh = self.upstream.fetch(mode).await?;

        // Re-read so a concurrent write between fetch start and now is
        // honored; merge only with a TTL-valid envelope.
        let merged = match self.cache.load().await {
            Ok(Some(envelope)) if !self.cache.is_stale(&envelope) => {
                debug!("merging fetched booking with cached segments");
                merge_bookings(&envelope.data, &fresh)
            }
            _ => fresh,
        };

        // The envelope must be durable before any caller sees this result.
        self.cache.save(&merged).await?;

        Ok(merged)
    }
}
