//! catalog-server: REST API over artists, albums and songs
//!
//! Layering:
//! - `http` parses requests and maps results/errors to status codes
//! - `db` owns the pool, the schema and one repository per entity
//! - `models` holds row types and request bodies shared by both

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, create_pool_with_options, PoolOptions};
pub use http::{build_router, run_server, ServerConfig};
