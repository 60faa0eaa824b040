//! `serve` and `migrate` commands
//!
//! Builds the pool once and hands it to the server; nothing else holds it.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser};

use catalog_server::db::{create_pool_with_options, schema, PgPool, PoolOptions};
use catalog_server::http::{run_server, ServerConfig};

/// Database connection arguments shared by every command
#[derive(Args, Debug)]
pub struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum connections in the pool
    #[arg(long, env = "CATALOG_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds to wait for a free pool connection
    #[arg(long, env = "CATALOG_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,
}

impl DatabaseArgs {
    fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }

    async fn connect(&self) -> Result<PgPool> {
        create_pool_with_options(&self.database_url, self.pool_options())
            .await
            .context("Failed to create database pool")
    }
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "CATALOG_BIND", default_value = "127.0.0.1:9000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Seconds before an in-flight request is abandoned with 408
    #[arg(long, env = "CATALOG_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Don't create missing tables on startup
    #[arg(long)]
    pub skip_migrations: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting catalog server on {}", args.bind);

    let pool = args.db.connect().await?;

    if args.skip_migrations {
        tracing::info!("Skipping migrations");
    } else {
        schema::run(&pool).await.context("Failed to run migrations")?;
    }

    // Run server (blocks until shutdown)
    run_server(pool, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}

/// Create the catalog tables and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.db.connect().await?;
    schema::run(&pool).await.context("Failed to run migrations")?;
    pool.close().await;
    Ok(())
}
