//! Query composition for `calendars`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::calendars;
use crate::model::calendar::{CalendarChangeset, CalendarRow, NewCalendar};

/// ## Summary
/// Returns a query to select all calendars.
#[must_use]
pub fn all() -> calendars::BoxedQuery<'static, diesel::pg::Pg> {
    calendars::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a calendar by ID.
#[must_use]
pub fn by_id(id: Uuid) -> calendars::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(calendars::id.eq(id))
}

/// ## Summary
/// Inserts a calendar and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails, the name is taken or the
/// owner does not exist.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    calendar: &NewCalendar<'_>,
) -> QueryResult<CalendarRow> {
    diesel::insert_into(calendars::table)
        .values(calendar)
        .returning(CalendarRow::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads a calendar by ID.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Option<CalendarRow>> {
    by_id(id)
        .select(CalendarRow::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Renames a calendar and bumps `updated_at`.
///
/// ## Errors
/// Returns an error if the database operation fails or the name is taken.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    changes: &CalendarChangeset<'_>,
) -> QueryResult<Option<CalendarRow>> {
    diesel::update(calendars::table.find(id))
        .set((changes, calendars::updated_at.eq(diesel::dsl::now)))
        .returning(CalendarRow::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a calendar together with its appointments.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<bool> {
    let deleted = diesel::delete(calendars::table.find(id))
        .execute(conn)
        .await?;
    Ok(deleted > 0)
}
