use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time::{deserialize_optional_instant, to_stored_precision};
use super::{User, trim_required};
use crate::error::{CoreError, CoreResult};

/// An appointment in a calendar. `(calendar_id, subject)` is unique.
///
/// A whole-day appointment has a start and no end; any other appointment has
/// both, with the end strictly after the start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appointment {
    pub id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub subject: String,
    pub description: Option<String>,
    pub whole_day: bool,
    #[serde(deserialize_with = "deserialize_optional_instant")]
    pub start: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_optional_instant")]
    pub end: Option<DateTime<Utc>>,
    pub calendar_id: Uuid,
    /// Eagerly loaded on read; changed only through the attendee operations.
    pub attendees: Vec<User>,
}

impl Appointment {
    /// ## Summary
    /// Builds a timed appointment.
    #[must_use]
    pub fn timed(
        subject: impl Into<String>,
        calendar_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            subject: subject.into(),
            start: Some(start),
            end: Some(end),
            calendar_id,
            ..Self::default()
        }
    }

    /// ## Summary
    /// Builds a whole-day appointment.
    #[must_use]
    pub fn whole_day(subject: impl Into<String>, calendar_id: Uuid, start: DateTime<Utc>) -> Self {
        Self {
            subject: subject.into(),
            whole_day: true,
            start: Some(start),
            calendar_id,
            ..Self::default()
        }
    }

    /// ## Summary
    /// Trims the subject and checks the appointment is ready to be inserted.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` for an empty subject or calendar,
    /// or an inconsistent time definition.
    pub fn validate(&mut self) -> CoreResult<()> {
        trim_required(&mut self.subject, "appointment subject can not be empty")?;
        if self.calendar_id.is_nil() {
            return Err(CoreError::validation(
                "appointment calendar_id can not be empty",
            ));
        }
        self.truncate_times();
        self.validate_time()
    }

    /// ## Summary
    /// Validation for the update path, where a nil `calendar_id` keeps the
    /// stored one.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` for an empty subject or an
    /// inconsistent time definition.
    pub fn validate_update(&mut self) -> CoreResult<()> {
        trim_required(&mut self.subject, "appointment subject can not be empty")?;
        self.truncate_times();
        self.validate_time()
    }

    /// Ordering is checked on the instants as they will be stored.
    fn truncate_times(&mut self) {
        self.start = self.start.map(to_stored_precision);
        self.end = self.end.map(to_stored_precision);
    }

    fn validate_time(&self) -> CoreResult<()> {
        let Some(start) = self.start else {
            return Err(CoreError::validation("start time can not be empty"));
        };
        match (self.whole_day, self.end) {
            (true, Some(_)) => Err(CoreError::validation(
                "both whole_day=true and end time provided",
            )),
            (true, None) => Ok(()),
            (false, None) => Err(CoreError::validation("end time can not be empty")),
            (false, Some(end)) if end <= start => Err(CoreError::validation(
                "appointment start time should be before end time",
            )),
            (false, Some(_)) => Ok(()),
        }
    }
}
