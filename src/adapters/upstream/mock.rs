//! Mock booking source for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::errors::{BookingError, BookingResult};
use crate::domain::models::{Booking, Location, OriginAndDestinationPair, Segment};
use crate::domain::ports::BookingSource;

/// Build the sample booking document used throughout the tests.
pub fn sample_booking() -> Booking {
    Booking {
        ship_reference: "ABCDEF".to_string(),
        ship_token: "AAAABBBCCCCDDD".to_string(),
        can_issue_ticket_checking: false,
        expiry_time: "1722409261".to_string(),
        duration: 2430,
        segments: vec![sample_segment(1, "AAA", "BBB"), sample_segment(2, "BBB", "CCC")],
    }
}

/// Build a segment with the given id and endpoint codes.
pub fn sample_segment(id: u32, origin: &str, destination: &str) -> Segment {
    Segment {
        id,
        origin_and_destination_pair: OriginAndDestinationPair {
            origin: Location::new(origin, format!("{origin} DisplayName"), "www.ship.com"),
            origin_city: origin.to_string(),
            destination: Location::new(
                destination,
                format!("{destination} DisplayName"),
                "www.ship.com",
            ),
            destination_city: destination.to_string(),
        },
    }
}

/// Scripted booking source.
///
/// Serves queued outcomes first, then a default outcome, optionally after a
/// fixed latency. Counts invocations so tests can assert single-flight
/// behavior.
pub struct MockBookingSource {
    default_response: BookingResult<Booking>,
    scripted: Mutex<VecDeque<BookingResult<Booking>>>,
    latency: Option<Duration>,
    calls: AtomicU32,
}

impl MockBookingSource {
    /// Source that always succeeds with the sample booking.
    pub fn succeeding() -> Self {
        Self::with_default(Ok(sample_booking()))
    }

    /// Source that always fails with a network error.
    pub fn failing() -> Self {
        Self::with_default(Err(BookingError::Network("connection refused".to_string())))
    }

    pub fn with_default(default_response: BookingResult<Booking>) -> Self {
        Self {
            default_response,
            scripted: Mutex::new(VecDeque::new()),
            latency: None,
            calls: AtomicU32::new(0),
        }
    }

    /// Delay every fetch by `latency`, simulating the network round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue an outcome served before the default kicks in.
    pub async fn push_response(&self, response: BookingResult<Booking>) {
        self.scripted.lock().await.push_back(response);
    }

    /// Number of fetch attempts made so far.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookingSource for MockBookingSource {
    async fn fetch(&self) -> BookingResult<Booking> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(scripted) = self.scripted.lock().await.pop_front() {
            return scripted;
        }
        self.default_response.clone()
    }
}
