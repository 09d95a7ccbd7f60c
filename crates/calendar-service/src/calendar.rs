use std::sync::Arc;

use uuid::Uuid;

use calendar_core::id::require_id;
use calendar_core::model::Calendar;
use calendar_db::repository::CalendarRepository;

use crate::error::{ServiceError, ServiceResult};

const ENTITY: &str = "calendar";

#[derive(Clone)]
pub struct CalendarService {
    repo: Arc<dyn CalendarRepository>,
}

impl CalendarService {
    #[must_use]
    pub fn new(repo: Arc<dyn CalendarRepository>) -> Self {
        Self { repo }
    }

    /// ## Summary
    /// Validates and stores a new calendar for `calendar.user_id`.
    ///
    /// ## Errors
    /// Validation errors, or `Integrity` if the name is taken or the owner is
    /// unknown.
    #[tracing::instrument(skip(self, calendar), fields(name = %calendar.name, user_id = %calendar.user_id))]
    pub async fn create(&self, mut calendar: Calendar) -> ServiceResult<Calendar> {
        calendar.validate()?;
        let created = self.repo.insert(&calendar).await?;

        tracing::info!(calendar_id = %created.id, "Calendar created");
        Ok(created)
    }

    /// ## Summary
    /// Loads a calendar with its appointments.
    ///
    /// ## Errors
    /// `EmptyIdentifier` for the nil id, `NotFound` if no calendar has it.
    #[tracing::instrument(skip(self))]
    pub async fn read(&self, id: Uuid) -> ServiceResult<Calendar> {
        let id = require_id(id, ENTITY)?;
        self.repo
            .find(id)
            .await?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    /// ## Summary
    /// Renames a calendar. The owner cannot be changed.
    ///
    /// ## Errors
    /// Validation errors, `NotFound`, or `Integrity` if the name is taken.
    #[tracing::instrument(skip(self, calendar), fields(calendar_id = %calendar.id))]
    pub async fn update(&self, mut calendar: Calendar) -> ServiceResult<Calendar> {
        calendar.validate_update()?;
        let id = require_id(calendar.id, ENTITY)?;

        self.repo
            .update(&calendar)
            .await?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    /// ## Summary
    /// Deletes a calendar and its appointments.
    ///
    /// ## Errors
    /// `EmptyIdentifier` for the nil id, `NotFound` if no calendar has it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<Uuid> {
        let id = require_id(id, ENTITY)?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(ENTITY, id));
        }

        tracing::info!(calendar_id = %id, "Calendar deleted");
        Ok(id)
    }
}
