//! Booking domain model.
//!
//! A `Booking` is the single perishable record this system caches. The wire
//! format encodes `expiry_time` as a decimal string of Unix *seconds*, while
//! the cache envelope works in milliseconds; the two clocks are deliberately
//! kept apart and converted explicitly at the boundary.

use serde::{Deserialize, Serialize};

/// A port or terminal a segment travels between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub code: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub url: String,
}

impl Location {
    pub fn new(
        code: impl Into<String>,
        display_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            url: url.into(),
        }
    }
}

/// Origin/destination endpoints of a single segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginAndDestinationPair {
    pub origin: Location,
    pub origin_city: String,
    pub destination: Location,
    pub destination_city: String,
}

/// One leg of a booking. `id` is unique within a booking and is the merge key
/// when a refreshed payload is combined with a cached one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: u32,
    pub origin_and_destination_pair: OriginAndDestinationPair,
}

/// The booking record fetched from upstream and held in the cache.
///
/// A `Booking` is never mutated in place: a refresh produces a new value,
/// optionally merged with the prior one segment-by-segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub ship_reference: String,
    pub ship_token: String,
    pub can_issue_ticket_checking: bool,
    /// Unix timestamp in *seconds*, as a decimal string (wire format).
    pub expiry_time: String,
    pub duration: i64,
    pub segments: Vec<Segment>,
}

impl Booking {
    /// Domain expiry as Unix seconds, if the wire stamp parses.
    pub fn expiry_epoch_secs(&self) -> Option<i64> {
        self.expiry_time.trim().parse::<i64>().ok()
    }

    /// Domain expiry as Unix milliseconds, if the wire stamp parses.
    pub fn expiry_epoch_ms(&self) -> Option<i64> {
        self.expiry_epoch_secs().map(|secs| secs * 1000)
    }

    /// Return a copy stamped with a new expiry (Unix seconds).
    pub fn with_expiry_secs(&self, epoch_secs: i64) -> Self {
        let mut booking = self.clone();
        booking.expiry_time = epoch_secs.to_string();
        booking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_segment(id: u32) -> Segment {
        Segment {
            id,
            origin_and_destination_pair: OriginAndDestinationPair {
                origin: Location::new("AAA", "AAA DisplayName", "www.ship.com"),
                origin_city: "AAA".to_string(),
                destination: Location::new("BBB", "BBB DisplayName", "www.ship.com"),
                destination_city: "BBB".to_string(),
            },
        }
    }

    fn sample_booking() -> Booking {
        Booking {
            ship_reference: "ABCDEF".to_string(),
            ship_token: "AAAABBBCCCCDDD".to_string(),
            can_issue_ticket_checking: false,
            expiry_time: "1722409261".to_string(),
            duration: 2430,
            segments: vec![sample_segment(1)],
        }
    }

    #[test]
    fn expiry_parses_seconds_and_scales_to_ms() {
        let booking = sample_booking();
        assert_eq!(booking.expiry_epoch_secs(), Some(1_722_409_261));
        assert_eq!(booking.expiry_epoch_ms(), Some(1_722_409_261_000));
    }

    #[test]
    fn malformed_expiry_yields_none() {
        let mut booking = sample_booking();
        booking.expiry_time = "not-a-timestamp".to_string();
        assert_eq!(booking.expiry_epoch_secs(), None);
    }

    #[test]
    fn with_expiry_replaces_only_the_stamp() {
        let booking = sample_booking();
        let restamped = booking.with_expiry_secs(1_800_000_000);
        assert_eq!(restamped.expiry_time, "1800000000");
        assert_eq!(restamped.ship_reference, booking.ship_reference);
        assert_eq!(restamped.segments, booking.segments);
    }

    #[test]
    fn wire_format_uses_camel_case_and_string_expiry() {
        let json = serde_json::to_value(sample_booking()).unwrap();
        assert_eq!(json["shipReference"], "ABCDEF");
        assert_eq!(json["canIssueTicketChecking"], false);
        assert!(json["expiryTime"].is_string());
        assert_eq!(
            json["segments"][0]["originAndDestinationPair"]["originCity"],
            "AAA"
        );
    }
}
