//! Schema bootstrap and test fixtures.
//!
//! ## Summary
//! `run_migrations` applies the embedded migrations at startup. The fixture
//! helpers are destructive and meant for tests: `recreate_schema` drops and
//! recreates every table, `truncate_all` empties them. Their errors must
//! abort the caller.

use diesel::Connection;
use diesel_async::{RunQueryDsl, SimpleAsyncConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::db::connection::DbConnection;
use crate::db::schema::{appointments, calendars, users, users_appointments};
use crate::error::DbResult;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Creates `users`, `calendars`, `appointments`, then `users_appointments`,
/// with their indexes and cascading foreign keys.
const CREATE_TABLES_SQL: &str =
    include_str!("../../migrations/00000000000001_create_calendar_tables/up.sql");

/// Drops `users_appointments`, `appointments`, `calendars`, then `users`.
const DROP_TABLES_SQL: &str =
    include_str!("../../migrations/00000000000001_create_calendar_tables/down.sql");

/// ## Summary
/// Applies all pending embedded migrations to the database at `database_url`.
///
/// ## Errors
/// Returns an error if the connection or any migration fails.
#[tracing::instrument(skip(database_url))]
pub async fn run_migrations(database_url: &str) -> anyhow::Result<()> {
    let url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = diesel::PgConnection::establish(&url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {e}"))?;
        tracing::info!(count = applied.len(), "Migrations applied");
        Ok::<_, anyhow::Error>(())
    })
    .await??;

    Ok(())
}

/// ## Summary
/// Drops and recreates all tables and their constraints.
///
/// ## Side Effects
/// Destroys every row in the calendar tables.
///
/// ## Errors
/// Returns a database error if any statement fails.
#[tracing::instrument(skip(conn))]
pub async fn recreate_schema(conn: &mut DbConnection<'_>) -> DbResult<()> {
    conn.batch_execute(DROP_TABLES_SQL).await?;
    conn.batch_execute(CREATE_TABLES_SQL).await?;

    tracing::debug!("Schema recreated");
    Ok(())
}

/// ## Summary
/// Deletes all rows, association table first so foreign keys hold throughout.
///
/// ## Errors
/// Returns a database error if any delete fails.
#[tracing::instrument(skip(conn))]
pub async fn truncate_all(conn: &mut DbConnection<'_>) -> DbResult<()> {
    diesel::delete(users_appointments::table)
        .execute(conn)
        .await?;
    diesel::delete(appointments::table).execute(conn).await?;
    diesel::delete(calendars::table).execute(conn).await?;
    diesel::delete(users::table).execute(conn).await?;

    tracing::debug!("All tables truncated");
    Ok(())
}
