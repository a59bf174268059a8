//! PostgreSQL connection pool setup.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;

/// Opens a PostgreSQL connection pool with the configured limits.
///
/// Connections are recycled after `db_max_lifetime` seconds and idle
/// connections are closed after `db_idle_timeout` seconds, keeping the pool
/// from accumulating stale connections behind a load balancer.
///
/// # Errors
///
/// Returns the underlying sqlx error if the database is unreachable.
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
}

/// Verifies the pool can reach the database.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
