//! Domain entities and their validation rules.
//!
//! ## Summary
//! Entities are plain values. `validate` is pure and in-memory: it trims the
//! string fields in place (the trimmed values are what gets persisted) and
//! never touches storage. Associations are carried as ids or eagerly loaded
//! children; no entity holds a back-reference to its parent.

pub mod appointment;
pub mod calendar;
pub mod time;
pub mod user;

pub use appointment::Appointment;
pub use calendar::Calendar;
pub use user::User;

use crate::error::{CoreError, CoreResult};

/// Trims `value` in place and fails with `message` if nothing is left.
pub(crate) fn trim_required(value: &mut String, message: &str) -> CoreResult<()> {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
    if value.is_empty() {
        return Err(CoreError::validation(message));
    }
    Ok(())
}
