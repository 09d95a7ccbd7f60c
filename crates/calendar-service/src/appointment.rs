use std::sync::Arc;

use uuid::Uuid;

use calendar_core::id::{parse_ids, require_id};
use calendar_core::model::Appointment;
use calendar_db::repository::AppointmentRepository;

use crate::error::{ServiceError, ServiceResult};

const ENTITY: &str = "appointment";

#[derive(Clone)]
pub struct AppointmentService {
    repo: Arc<dyn AppointmentRepository>,
}

impl AppointmentService {
    #[must_use]
    pub fn new(repo: Arc<dyn AppointmentRepository>) -> Self {
        Self { repo }
    }

    /// ## Summary
    /// Validates and stores a new appointment in `appointment.calendar_id`.
    ///
    /// ## Errors
    /// Validation errors for bad fields or times, `Integrity` if the subject
    /// is taken in the calendar or the calendar is unknown.
    #[tracing::instrument(skip(self, appointment), fields(subject = %appointment.subject, calendar_id = %appointment.calendar_id))]
    pub async fn create(&self, mut appointment: Appointment) -> ServiceResult<Appointment> {
        appointment.validate()?;
        let created = self.repo.insert(&appointment).await?;

        tracing::info!(appointment_id = %created.id, "Appointment created");
        Ok(created)
    }

    /// ## Summary
    /// Loads an appointment with its attendees.
    ///
    /// ## Errors
    /// `EmptyIdentifier` for the nil id, `NotFound` if no appointment has it.
    #[tracing::instrument(skip(self))]
    pub async fn read(&self, id: Uuid) -> ServiceResult<Appointment> {
        let id = require_id(id, ENTITY)?;
        self.repo
            .find(id)
            .await?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    /// ## Summary
    /// Replaces the scalar fields of an appointment.
    ///
    /// A nil `calendar_id` keeps the current calendar. Attendees are not
    /// touched.
    ///
    /// ## Errors
    /// Validation errors, `NotFound`, or `Integrity` on a constraint violation.
    #[tracing::instrument(skip(self, appointment), fields(appointment_id = %appointment.id))]
    pub async fn update(&self, mut appointment: Appointment) -> ServiceResult<Appointment> {
        appointment.validate_update()?;
        let id = require_id(appointment.id, ENTITY)?;

        self.repo
            .update(&appointment)
            .await?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    /// ## Summary
    /// Deletes an appointment and its attendances.
    ///
    /// ## Errors
    /// `EmptyIdentifier` for the nil id, `NotFound` if no appointment has it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<Uuid> {
        let id = require_id(id, ENTITY)?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(ENTITY, id));
        }

        tracing::info!(appointment_id = %id, "Appointment deleted");
        Ok(id)
    }

    /// ## Summary
    /// Adds users to an appointment and returns the refreshed appointment.
    ///
    /// Every id is parsed before anything is written.
    ///
    /// ## Errors
    /// `InvalidIdentifier` for a malformed id, `Integrity` if the appointment
    /// or a user is unknown, `NotFound` if the appointment is gone afterwards.
    #[tracing::instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    pub async fn add_attendees<S>(&self, id: Uuid, user_ids: &[S]) -> ServiceResult<Appointment>
    where
        S: AsRef<str> + Sync,
    {
        let id = require_id(id, ENTITY)?;
        let user_ids = parse_ids(user_ids)?;

        self.repo.add_attendees(id, &user_ids).await?;
        self.read(id).await
    }

    /// ## Summary
    /// Removes users from an appointment and returns the refreshed appointment.
    ///
    /// Users that were not attending are ignored.
    ///
    /// ## Errors
    /// `InvalidIdentifier` for a malformed id, `NotFound` if the appointment
    /// does not exist.
    #[tracing::instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    pub async fn remove_attendees<S>(&self, id: Uuid, user_ids: &[S]) -> ServiceResult<Appointment>
    where
        S: AsRef<str> + Sync,
    {
        let id = require_id(id, ENTITY)?;
        let user_ids = parse_ids(user_ids)?;

        self.repo.remove_attendees(id, &user_ids).await?;
        self.read(id).await
    }
}
