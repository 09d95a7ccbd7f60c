//! Query composition for `users_appointments`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::{users, users_appointments};
use crate::model::attendee::Attendee;
use crate::model::user::UserRow;

/// ## Summary
/// Links users to an appointment. Pairs that already exist are left alone.
///
/// ## Errors
/// Returns a foreign-key error if the appointment or any user does not exist.
pub async fn insert_batch(conn: &mut DbConnection<'_>, links: &[Attendee]) -> QueryResult<usize> {
    if links.is_empty() {
        return Ok(0);
    }

    diesel::insert_into(users_appointments::table)
        .values(links)
        .on_conflict_do_nothing()
        .execute(conn)
        .await
}

/// ## Summary
/// Unlinks the given users from an appointment. Missing pairs are ignored.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete_batch(
    conn: &mut DbConnection<'_>,
    appointment_id: Uuid,
    user_ids: &[Uuid],
) -> QueryResult<usize> {
    if user_ids.is_empty() {
        return Ok(0);
    }

    diesel::delete(
        users_appointments::table
            .filter(users_appointments::appointment_id.eq(appointment_id))
            .filter(users_appointments::user_id.eq_any(user_ids)),
    )
    .execute(conn)
    .await
}

/// ## Summary
/// Loads the users attending an appointment, ordered by creation time.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn users_for_appointment(
    conn: &mut DbConnection<'_>,
    appointment_id: Uuid,
) -> QueryResult<Vec<UserRow>> {
    users_appointments::table
        .inner_join(users::table)
        .filter(users_appointments::appointment_id.eq(appointment_id))
        .order((users::created_at.asc(), users::id.asc()))
        .select(UserRow::as_select())
        .load(conn)
        .await
}
