//! Query composition for `users`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::{appointments, users, users_appointments};
use crate::model::user::{NewUser, UserChangeset, UserRow};

/// ## Summary
/// Returns a query to select all users.
#[must_use]
pub fn all() -> users::BoxedQuery<'static, diesel::pg::Pg> {
    users::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a user by ID.
#[must_use]
pub fn by_id(id: Uuid) -> users::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(users::id.eq(id))
}

/// ## Summary
/// Inserts a user and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails or a constraint is violated.
pub async fn insert(conn: &mut DbConnection<'_>, user: &NewUser<'_>) -> QueryResult<UserRow> {
    diesel::insert_into(users::table)
        .values(user)
        .returning(UserRow::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads a user by ID.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Option<UserRow>> {
    by_id(id)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Returns the IDs of the appointments a user attends, oldest first.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn appointment_ids(conn: &mut DbConnection<'_>, user_id: Uuid) -> QueryResult<Vec<Uuid>> {
    users_appointments::table
        .inner_join(appointments::table)
        .filter(users_appointments::user_id.eq(user_id))
        .order((appointments::created_at.asc(), appointments::id.asc()))
        .select(appointments::id)
        .load(conn)
        .await
}

/// ## Summary
/// Writes the scalar fields of a user and bumps `updated_at`.
///
/// Returns `None` when no user has the given ID.
///
/// ## Errors
/// Returns an error if the database operation fails or a constraint is violated.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    changes: &UserChangeset<'_>,
) -> QueryResult<Option<UserRow>> {
    diesel::update(users::table.find(id))
        .set((changes, users::updated_at.eq(diesel::dsl::now)))
        .returning(UserRow::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a user. Calendars, appointments and attendances cascade.
///
/// Returns whether a row was deleted.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<bool> {
    let deleted = diesel::delete(users::table.find(id))
        .execute(conn)
        .await?;
    Ok(deleted > 0)
}
