//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and an acquire timeout,
//! so a saturated pool fails the request instead of parking it forever.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a free connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool tuning knobs
#[derive(Debug, Clone, Copy)]
pub struct PoolOptions {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

impl PoolOptions {
    fn to_sqlx(self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Create a PostgreSQL connection pool with default options.
///
/// # Errors
///
/// Returns an error if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/music").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, PoolOptions::default()).await
}

/// Create a PostgreSQL connection pool with custom options.
pub async fn create_pool_with_options(
    database_url: &str,
    options: PoolOptions,
) -> Result<PgPool, sqlx::Error> {
    options.to_sqlx().connect(database_url).await
}

/// Create a pool that connects on first use.
///
/// Only fails if the URL cannot be parsed.
pub fn create_lazy_pool(database_url: &str, options: PoolOptions) -> Result<PgPool, sqlx::Error> {
    options.to_sqlx().connect_lazy(database_url)
}
