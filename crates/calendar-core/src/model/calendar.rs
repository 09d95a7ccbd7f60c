use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Appointment, trim_required};
use crate::error::{CoreError, CoreResult};

/// A named calendar owned by exactly one user. Names are globally unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calendar {
    pub id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub name: String,
    pub user_id: Uuid,
    /// Eagerly loaded on read; empty, never absent, when there are none.
    pub appointments: Vec<Appointment>,
}

impl Calendar {
    #[must_use]
    pub fn new(name: impl Into<String>, user_id: Uuid) -> Self {
        Self {
            name: name.into(),
            user_id,
            ..Self::default()
        }
    }

    /// ## Summary
    /// Trims the name and checks the calendar is ready to be inserted.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` for an empty name or owner.
    pub fn validate(&mut self) -> CoreResult<()> {
        self.validate_update()?;
        if self.user_id.is_nil() {
            return Err(CoreError::validation("calendar user_id can not be empty"));
        }
        Ok(())
    }

    /// ## Summary
    /// Validation for the update path, where only the name is written.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` for an empty name.
    pub fn validate_update(&mut self) -> CoreResult<()> {
        trim_required(&mut self.name, "calendar name can not be empty")
    }
}
