//! Merge-on-refresh for booking records.
//!
//! A refresh must not silently drop segments the cache already had, while
//! still letting genuinely updated segments override. Scalar fields always
//! take the incoming value; segments are merged by `id` through an ordered
//! map, so the result is sorted ascending by id.

use std::collections::BTreeMap;

use crate::domain::models::{Booking, Segment};

/// Combine a cached booking with a freshly fetched one.
///
/// Scalars (reference, token, flags, duration, expiry stamp) come from
/// `fresh`. Segments present in both keep the fresh version; segments unique
/// to either side are kept.
pub fn merge_bookings(cached: &Booking, fresh: &Booking) -> Booking {
    let mut merged = fresh.clone();
    merged.segments = merge_segments(&cached.segments, &fresh.segments);
    merged
}

fn merge_segments(cached: &[Segment], fresh: &[Segment]) -> Vec<Segment> {
    let mut by_id: BTreeMap<u32, Segment> = BTreeMap::new();

    for segment in cached {
        by_id.insert(segment.id, segment.clone());
    }
    // Fresh entries override cached ones on id collision.
    for segment in fresh {
        by_id.insert(segment.id, segment.clone());
    }

    by_id.into_values().collect()
}
