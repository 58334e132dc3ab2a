//! Generic protobuf ↔ domain conversions
//!
//! Timestamps travel as `google.protobuf.Timestamp` on the wire and as
//! `DateTime<Utc>` in the domain. These helpers are domain-agnostic.
//!
//! ## Usage
//!
//! ```ignore
//! use grpc_server::conversions::*;
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let timestamp = datetime_to_timestamp(now);
//! let dt_back = timestamp_to_datetime(&timestamp)?;
//! ```

use chrono::{DateTime, Utc};
use prost_types::Timestamp;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

// ============================================================================
// Timestamp Conversions (google.protobuf.Timestamp ↔ DateTime<Utc>)
// ============================================================================

/// Convert DateTime<Utc> to a protobuf Timestamp
///
/// Total: every `DateTime<Utc>` fits the protobuf range chrono can represent.
/// A leap second (subsec nanos of 1s or more) rolls over into the next second,
/// since protobuf timestamps have no leap seconds.
pub fn datetime_to_timestamp(dt: DateTime<Utc>) -> Timestamp {
  let subsec = dt.timestamp_subsec_nanos();
  Timestamp {
    seconds: dt.timestamp() + i64::from(subsec / NANOS_PER_SECOND),
    nanos: (subsec % NANOS_PER_SECOND) as i32,
  }
}

/// Convert a protobuf Timestamp to DateTime<Utc>
///
/// Returns an error when the seconds are out of chrono's range or the nanos
/// are outside `0..1_000_000_000`.
pub fn timestamp_to_datetime(ts: &Timestamp) -> Result<DateTime<Utc>, String> {
  let nanos = u32::try_from(ts.nanos)
    .ok()
    .filter(|n| *n < NANOS_PER_SECOND)
    .ok_or_else(|| format!("Invalid timestamp nanos: {}", ts.nanos))?;

  DateTime::from_timestamp(ts.seconds, nanos)
    .ok_or_else(|| format!("Timestamp out of range: {}s", ts.seconds))
}

/// Convert an optional protobuf Timestamp, mapping absence to the Unix epoch
pub fn opt_timestamp_to_datetime(ts: Option<&Timestamp>) -> Result<DateTime<Utc>, String> {
  match ts {
    Some(ts) => timestamp_to_datetime(ts),
    // DateTime<Utc>::default() is 1970-01-01T00:00:00Z
    None => Ok(DateTime::<Utc>::default()),
  }
}
