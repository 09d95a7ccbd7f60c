//! Instant handling for appointment times.
//!
//! ## Summary
//! An unset instant is `None`. On the wire a missing field, `null` and the
//! reserved zero timestamp `0001-01-01T00:00:00Z` all mean "unset", so that
//! clients which always serialize a zero time still round-trip. The epoch
//! (`1970-01-01T00:00:00Z`) is an ordinary instant.
//!
//! Stored instants carry microsecond precision, the resolution of a
//! PostgreSQL `TIMESTAMPTZ`. Anything finer is truncated before validation.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};

/// Unix seconds of the reserved zero timestamp `0001-01-01T00:00:00Z`.
pub const ZERO_INSTANT_SECS: i64 = -62_135_596_800;

/// Fractional-second digits kept in stored instants.
pub const STORED_SUBSEC_DIGITS: u16 = 6;

/// ## Summary
/// Truncates `instant` to the precision it is stored with.
#[must_use]
pub fn to_stored_precision(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(STORED_SUBSEC_DIGITS)
}

/// ## Summary
/// Returns true if `instant` is the reserved zero timestamp.
#[must_use]
pub fn is_zero_instant(instant: &DateTime<Utc>) -> bool {
    instant.timestamp() == ZERO_INSTANT_SECS && instant.timestamp_subsec_nanos() == 0
}

/// ## Summary
/// Deserializes an optional RFC 3339 instant, mapping the zero timestamp to
/// `None` and truncating to stored precision.
///
/// ## Errors
/// Returns a deserialization error for values that are not RFC 3339 instants.
pub fn deserialize_optional_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(value
        .filter(|instant| !is_zero_instant(instant))
        .map(to_stored_precision))
}
