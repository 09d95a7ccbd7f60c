use diesel::{pg::Pg, prelude::*};

use calendar_core::error::CoreError;
use calendar_core::model::Appointment;
use calendar_core::model::time::to_stored_precision;

use crate::db::schema;
use crate::model::calendar::CalendarRow;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = schema::appointments)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(CalendarRow, foreign_key = calendar_id))]
pub struct AppointmentRow {
    pub id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub subject: String,
    pub description: Option<String>,
    pub whole_day: bool,
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub end_at: Option<chrono::DateTime<chrono::Utc>>,
    pub calendar_id: uuid::Uuid,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::appointments)]
pub struct NewAppointment<'a> {
    pub id: Option<uuid::Uuid>,
    pub subject: &'a str,
    pub description: Option<&'a str>,
    pub whole_day: bool,
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub end_at: Option<chrono::DateTime<chrono::Utc>>,
    pub calendar_id: uuid::Uuid,
}

/// Partial update of the scalar fields. `None` leaves a column untouched,
/// except for `end_at`, which is always written so it can be cleared.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::appointments)]
pub struct AppointmentChangeset<'a> {
    pub subject: &'a str,
    pub description: Option<&'a str>,
    pub whole_day: bool,
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub end_at: Option<Option<chrono::DateTime<chrono::Utc>>>,
    pub calendar_id: Option<uuid::Uuid>,
}

impl<'a> TryFrom<&'a Appointment> for NewAppointment<'a> {
    type Error = CoreError;

    fn try_from(appt: &'a Appointment) -> Result<Self, Self::Error> {
        let start_at = appt
            .start
            .map(to_stored_precision)
            .ok_or(CoreError::InvariantViolation("appointment start must be set"))?;
        Ok(Self {
            id: (!appt.id.is_nil()).then_some(appt.id),
            subject: &appt.subject,
            description: appt.description.as_deref(),
            whole_day: appt.whole_day,
            start_at,
            end_at: appt.end.map(to_stored_precision),
            calendar_id: appt.calendar_id,
        })
    }
}

impl<'a> TryFrom<&'a Appointment> for AppointmentChangeset<'a> {
    type Error = CoreError;

    fn try_from(appt: &'a Appointment) -> Result<Self, Self::Error> {
        let start_at = appt
            .start
            .map(to_stored_precision)
            .ok_or(CoreError::InvariantViolation("appointment start must be set"))?;
        Ok(Self {
            subject: &appt.subject,
            description: appt.description.as_deref(),
            whole_day: appt.whole_day,
            start_at,
            end_at: Some(appt.end.map(to_stored_precision)),
            calendar_id: (!appt.calendar_id.is_nil()).then_some(appt.calendar_id),
        })
    }
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Self {
            id: row.id,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
            subject: row.subject,
            description: row.description,
            whole_day: row.whole_day,
            start: Some(row.start_at),
            end: row.end_at,
            calendar_id: row.calendar_id,
            attendees: Vec::new(),
        }
    }
}
