//! HTTP implementation of the BookingSource port.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use crate::domain::errors::{BookingError, BookingResult};
use crate::domain::models::{Booking, UpstreamConfig};
use crate::domain::ports::BookingSource;

/// Fetches the booking document from an HTTP endpoint.
///
/// Error mapping follows the retry contract: connection problems and
/// timeouts become `Network`, 5xx responses become `ServiceUnavailable`
/// (both retryable); 4xx responses and malformed payloads are terminal.
pub struct HttpBookingSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBookingSource {
    pub fn new(config: &UpstreamConfig) -> BookingResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| BookingError::Unknown(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl BookingSource for HttpBookingSource {
    async fn fetch(&self) -> BookingResult<Booking> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    BookingError::Network(e.to_string())
                } else {
                    BookingError::Unknown(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(BookingError::ServiceUnavailable(format!(
                "upstream returned {status}"
            )));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(BookingError::ServiceUnavailable(format!(
                "upstream returned {status}"
            )));
        }
        if !status.is_success() {
            return Err(BookingError::Unknown(format!("upstream returned {status}")));
        }

        response
            .json::<Booking>()
            .await
            .map_err(|e| BookingError::Unknown(format!("malformed booking payload: {e}")))
    }
}
