//! Persistence layer: connection pool, migrations, models and repositories.

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod repositories;

pub use error::DbError;

pub type DbPool = sqlx::PgPool;

/// Upper bound on every individual query issued by a repository.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Pool sizing knobs, filled from the server configuration.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub idle_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 25,
            idle_timeout: Duration::from_secs(15 * 60),
        }
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, settings: &PoolSettings) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .idle_timeout(settings.idle_timeout)
        .acquire_timeout(QUERY_TIMEOUT)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), DbError> {
    timed(sqlx::query("SELECT 1").execute(pool)).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Run a query future under [`QUERY_TIMEOUT`].
pub(crate) async fn timed<T, F>(fut: F) -> Result<T, DbError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
        Ok(result) => result.map_err(DbError::from),
        Err(_) => Err(DbError::Timeout(QUERY_TIMEOUT)),
    }
}
