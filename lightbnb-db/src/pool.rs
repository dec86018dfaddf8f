//! Connection pool construction
//!
//! Repositories borrow a shared `PgPool`; the pool is the only place
//! connections are limited. Timeouts stay at sqlx defaults.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Open a pool using `config.url`, capped at `config.max_connections`.
///
/// # Errors
///
/// Returns the driver error if the first connection cannot be established.
///
/// # Example
///
/// ```ignore
/// let pool = lightbnb_db::connect(&DatabaseConfig::from_env()).await?;
/// ```
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        url = %config.redacted_url(),
        max_connections = config.max_connections,
        "connecting to database"
    );
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

/// Open a pool for `database_url` with the default connection cap.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    connect(&DatabaseConfig {
        url: database_url.to_owned(),
        ..DatabaseConfig::default()
    })
    .await
}
