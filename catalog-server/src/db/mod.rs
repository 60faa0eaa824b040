//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One pool, built at startup and passed in; repositories only borrow it
//! - List and detail reads use JOINs for display names
//! - Rely on DB constraints, classify their errors - no check-then-insert
//! - Every write is a single statement

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_lazy_pool, create_pool, create_pool_with_options, PoolOptions};
pub use repos::*;
pub use sqlx::PgPool;
