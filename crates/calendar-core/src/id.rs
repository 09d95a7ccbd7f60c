//! Identifier handling.
//!
//! ## Summary
//! Every entity is keyed by a UUID. Path segments and attendee lists arrive as
//! strings and must be UUID-shaped before they reach storage; the nil UUID is
//! the "empty" identifier.

use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// ## Summary
/// Parses a UUID-shaped identifier token.
///
/// ## Errors
/// Returns `CoreError::InvalidIdentifier` if the value is not a valid UUID.
pub fn parse_id(value: &str) -> CoreResult<Uuid> {
    Uuid::parse_str(value).map_err(|_err| CoreError::InvalidIdentifier(value.to_string()))
}

/// ## Summary
/// Parses every identifier in `values`, failing on the first malformed one.
///
/// ## Errors
/// Returns `CoreError::InvalidIdentifier` naming the first invalid value.
pub fn parse_ids<S: AsRef<str>>(values: &[S]) -> CoreResult<Vec<Uuid>> {
    values.iter().map(|v| parse_id(v.as_ref())).collect()
}

/// ## Summary
/// Rejects the nil identifier.
///
/// ## Errors
/// Returns `CoreError::EmptyIdentifier` for the nil UUID.
pub fn require_id(id: Uuid, entity: &'static str) -> CoreResult<Uuid> {
    if id.is_nil() {
        Err(CoreError::EmptyIdentifier(entity))
    } else {
        Ok(id)
    }
}
