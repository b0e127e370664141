//! Integration tests for the HTTP booking source, using a local mock server.

use purser::adapters::upstream::mock::sample_booking;
use purser::adapters::HttpBookingSource;
use purser::domain::errors::{BookingError, ErrorClassification};
use purser::domain::models::UpstreamConfig;
use purser::BookingSource;

fn config_for(server: &mockito::ServerGuard) -> UpstreamConfig {
    UpstreamConfig {
        endpoint: format!("{}/booking", server.url()),
        request_timeout_ms: 2000,
        ..UpstreamConfig::default()
    }
}

#[tokio::test]
async fn parses_the_wire_format() {
    let mut server = mockito::Server::new_async().await;
    let body = serde_json::to_string(&sample_booking()).unwrap();
    let mock = server
        .mock("GET", "/booking")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let source = HttpBookingSource::new(&config_for(&server)).unwrap();
    let booking = source.fetch().await.unwrap();

    assert_eq!(booking.ship_reference, "ABCDEF");
    assert_eq!(booking.expiry_time, "1722409261");
    assert_eq!(booking.segments.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn server_errors_map_to_service_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/booking")
        .with_status(503)
        .create_async()
        .await;

    let source = HttpBookingSource::new(&config_for(&server)).unwrap();
    let err = source.fetch().await.unwrap_err();

    assert_eq!(err.classification(), ErrorClassification::ServiceUnavailable);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn client_errors_are_terminal() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/booking")
        .with_status(404)
        .create_async()
        .await;

    let source = HttpBookingSource::new(&config_for(&server)).unwrap();
    let err = source.fetch().await.unwrap_err();

    assert!(matches!(err, BookingError::Unknown(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn malformed_payloads_are_terminal() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/booking")
        .with_status(200)
        .with_body("{\"unexpected\": true}")
        .create_async()
        .await;

    let source = HttpBookingSource::new(&config_for(&server)).unwrap();
    let err = source.fetch().await.unwrap_err();

    assert!(matches!(err, BookingError::Unknown(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn connection_refused_maps_to_network() {
    // Nothing listens on this port.
    let config = UpstreamConfig {
        endpoint: "http://127.0.0.1:1/booking".to_string(),
        request_timeout_ms: 500,
        ..UpstreamConfig::default()
    };

    let source = HttpBookingSource::new(&config).unwrap();
    let err = source.fetch().await.unwrap_err();

    assert_eq!(err.classification(), ErrorClassification::Network);
    assert!(err.is_retryable());
}
