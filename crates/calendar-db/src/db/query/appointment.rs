//! Query composition for `appointments`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::appointments;
use crate::model::appointment::{AppointmentChangeset, AppointmentRow, NewAppointment};
use crate::model::calendar::CalendarRow;

/// ## Summary
/// Returns a query to select all appointments.
#[must_use]
pub fn all() -> appointments::BoxedQuery<'static, diesel::pg::Pg> {
    appointments::table.into_boxed()
}

/// ## Summary
/// Returns a query to find an appointment by ID.
#[must_use]
pub fn by_id(id: Uuid) -> appointments::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(appointments::id.eq(id))
}

/// ## Summary
/// Inserts an appointment and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails, the subject is taken in
/// the calendar or the calendar does not exist.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    appointment: &NewAppointment<'_>,
) -> QueryResult<AppointmentRow> {
    diesel::insert_into(appointments::table)
        .values(appointment)
        .returning(AppointmentRow::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads an appointment by ID.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Option<AppointmentRow>> {
    by_id(id)
        .select(AppointmentRow::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Loads the appointments of a calendar, oldest first.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn for_calendar(
    conn: &mut DbConnection<'_>,
    calendar: &CalendarRow,
) -> QueryResult<Vec<AppointmentRow>> {
    AppointmentRow::belonging_to(calendar)
        .order((appointments::created_at.asc(), appointments::id.asc()))
        .select(AppointmentRow::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Writes the scalar fields of an appointment and bumps `updated_at`.
///
/// ## Errors
/// Returns an error if the database operation fails or a constraint is violated.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    changes: &AppointmentChangeset<'_>,
) -> QueryResult<Option<AppointmentRow>> {
    diesel::update(appointments::table.find(id))
        .set((changes, appointments::updated_at.eq(diesel::dsl::now)))
        .returning(AppointmentRow::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes an appointment and its attendances.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<bool> {
    let deleted = diesel::delete(appointments::table.find(id))
        .execute(conn)
        .await?;
    Ok(deleted > 0)
}
