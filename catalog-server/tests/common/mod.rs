//! Shared helpers for driving the router in tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use catalog_server::db::{create_lazy_pool, schema, PoolOptions};
use catalog_server::{build_router, create_pool, ServerConfig};
use serde_json::Value;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Router over a pool that never connects.
///
/// Good for anything decided before a repository runs.
pub fn offline_app() -> Router {
    let options = PoolOptions {
        max_connections: 1,
        acquire_timeout: Duration::from_secs(1),
    };
    let pool = create_lazy_pool("postgres://catalog@127.0.0.1:1/catalog", options)
        .expect("valid url");
    build_router(pool, &ServerConfig::default())
}

/// Router over a database that accepts connections and never answers.
///
/// Any request that needs a connection hangs until `request_timeout`.
pub async fn stalled_app(request_timeout: Duration) -> Router {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        // Hold sockets open so the handshake never completes
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let options = PoolOptions {
        max_connections: 1,
        acquire_timeout: Duration::from_secs(10),
    };
    let pool = create_lazy_pool(&format!("postgres://catalog@{}/catalog", addr), options)
        .expect("valid url");
    let config = ServerConfig {
        request_timeout,
        ..ServerConfig::default()
    };
    build_router(pool, &config)
}

/// Router over `DATABASE_URL`, with the schema in place.
pub async fn db_app() -> (Router, PgPool) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    schema::run(&pool).await.expect("migrations failed");
    (build_router(pool.clone(), &ServerConfig::default()), pool)
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Send one request; an empty response body comes back as `Value::Null`.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    send_raw(app, request).await
}

pub async fn send_raw(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };

    Reply {
        status,
        headers,
        body,
    }
}

/// Suffix that keeps rows from parallel tests and earlier runs apart.
pub fn unique(prefix: &str) -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!(
        "{} {}-{}",
        prefix,
        nanos,
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

/// Pull the numeric `id` out of a response body.
pub fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("id in body")
}
