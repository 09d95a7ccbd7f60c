use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use calendar_core::config::DatabaseConfig;

use crate::db::DbProvider;
use crate::error::DbResult;

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection<'pool> = PooledConnection<'pool, AsyncPgConnection>;

/// ## Summary
/// Creates the database connection pool described by `config`.
///
/// The pool keeps up to `max_connections` connections, tries to hold
/// `min_idle` of them open, and recycles each one after
/// `connection_max_lifetime_secs` (0 disables recycling).
///
/// ## Errors
/// Returns an error if the pool cannot be created or the initial connections
/// cannot be established. Callers treat this as fatal at startup.
#[tracing::instrument(skip(config), fields(
    host = %config.host,
    database = %config.name,
    pool_size = config.max_connections
))]
pub async fn create_pool(config: &DatabaseConfig) -> anyhow::Result<DbPool> {
    tracing::debug!("Creating database connection pool");

    let max_size = config.max_connections.max(1);
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url()?);

    let pool = Pool::builder()
        .max_size(max_size)
        .min_idle(Some(config.min_idle.min(max_size)))
        .test_on_check_out(false)
        .max_lifetime(config.connection_max_lifetime())
        .build(manager)
        .await?;

    tracing::info!(
        pool_size = max_size,
        "Database connection pool created successfully"
    );

    Ok(pool)
}

/// ## Summary
/// Creates a pool from a ready-made URL with a fixed size.
///
/// ## Errors
/// Returns an error if the pool cannot be created.
#[tracing::instrument(skip(database_url), fields(pool_size = size))]
pub async fn create_pool_from_url(database_url: &str, size: u32) -> anyhow::Result<DbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

    Ok(Pool::builder().max_size(size.max(1)).build(manager).await?)
}

impl DbProvider for DbPool {
    #[tracing::instrument(skip(self))]
    fn get_connection<'a>(
        &'a self,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = DbResult<DbConnection<'a>>> + Send + 'a>>
    {
        Box::pin(async move {
            let conn = self.get().await?;
            Ok(conn)
        })
    }
}
