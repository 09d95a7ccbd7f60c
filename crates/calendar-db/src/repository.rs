//! Storage ports, one per entity.
//!
//! ## Summary
//! The traits are object-safe so services can hold them as
//! `Arc<dyn ...Repository>` and tests can swap PostgreSQL for
//! [`crate::memory::MemoryStore`]. Implementations report constraint
//! violations as [`crate::error::DbError::Integrity`] and a missing row as
//! `None` or `false`, never as an error.

use async_trait::async_trait;
use uuid::Uuid;

use calendar_core::model::{Appointment, Calendar, User};

use crate::error::DbResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ## Summary
    /// Persists a new user. A nil id is replaced by a generated one.
    ///
    /// ## Errors
    /// `Integrity` if the first/last name pair is taken.
    async fn insert(&self, user: &User) -> DbResult<User>;

    /// ## Summary
    /// Loads a user with the ids of the appointments they attend.
    async fn find(&self, id: Uuid) -> DbResult<Option<User>>;

    /// ## Summary
    /// Writes the scalar fields of `user`. Attendances are not touched.
    ///
    /// ## Errors
    /// `Integrity` if the new first/last name pair is taken.
    async fn update(&self, user: &User) -> DbResult<Option<User>>;

    /// ## Summary
    /// Deletes a user, cascading to their calendars and attendances.
    async fn delete(&self, id: Uuid) -> DbResult<bool>;
}

#[async_trait]
pub trait CalendarRepository: Send + Sync {
    /// ## Summary
    /// Persists a new calendar.
    ///
    /// ## Errors
    /// `Integrity` if the name is taken or the owner does not exist.
    async fn insert(&self, calendar: &Calendar) -> DbResult<Calendar>;

    /// ## Summary
    /// Loads a calendar with its appointments, oldest first.
    async fn find(&self, id: Uuid) -> DbResult<Option<Calendar>>;

    /// ## Summary
    /// Renames a calendar.
    async fn update(&self, calendar: &Calendar) -> DbResult<Option<Calendar>>;

    async fn delete(&self, id: Uuid) -> DbResult<bool>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// ## Summary
    /// Persists a new appointment.
    ///
    /// ## Errors
    /// `Integrity` if the subject is taken in the calendar or the calendar
    /// does not exist.
    async fn insert(&self, appointment: &Appointment) -> DbResult<Appointment>;

    /// ## Summary
    /// Loads an appointment with its attendees.
    async fn find(&self, id: Uuid) -> DbResult<Option<Appointment>>;

    /// ## Summary
    /// Writes the scalar fields of `appointment`. A nil `calendar_id` keeps
    /// the current calendar.
    async fn update(&self, appointment: &Appointment) -> DbResult<Option<Appointment>>;

    async fn delete(&self, id: Uuid) -> DbResult<bool>;

    /// ## Summary
    /// Adds attendees and returns the resulting attendee list.
    ///
    /// Pairs that already exist are kept as they are.
    ///
    /// ## Errors
    /// `Integrity` if the appointment or any user does not exist. Nothing is
    /// written in that case.
    async fn add_attendees(&self, appointment_id: Uuid, user_ids: &[Uuid]) -> DbResult<Vec<User>>;

    /// ## Summary
    /// Removes attendees and returns the remaining attendee list.
    ///
    /// Users that are not attending are ignored.
    async fn remove_attendees(
        &self,
        appointment_id: Uuid,
        user_ids: &[Uuid],
    ) -> DbResult<Vec<User>>;
}
