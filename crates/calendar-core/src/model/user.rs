use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::trim_required;
use crate::error::{CoreError, CoreResult};

#[expect(clippy::expect_used, reason = "the pattern is a compile-time constant")]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,4}$").expect("email pattern compiles")
});

/// A calendar user. `(first_name, last_name)` is unique across users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Appointments this user attends. Read-only: filled on read, ignored on write.
    pub appointments: Vec<Uuid>,
}

impl User {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// ## Summary
    /// Trims the name and email fields and checks them.
    ///
    /// The email must match `local@domain.tld` with a lowercase ASCII local
    /// part and a 2-4 letter top-level segment. It is not normalized.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` naming the first offending field.
    pub fn validate(&mut self) -> CoreResult<()> {
        trim_required(&mut self.first_name, "first name can not be empty")?;
        trim_required(&mut self.last_name, "last name can not be empty")?;
        trim_required(&mut self.email, "email can not be empty")?;
        if !EMAIL_PATTERN.is_match(&self.email) {
            return Err(CoreError::validation(format!(
                "{} is not a valid email",
                self.email
            )));
        }
        Ok(())
    }
}
