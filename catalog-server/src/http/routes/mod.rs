//! Route handlers organized by resource

pub mod health;
pub mod artists;
pub mod albums;
pub mod songs;

use axum::http::{header, HeaderName, StatusCode};
use axum::Json;

/// Response carrying a `Location` header for the written resource
pub type Located<T> = (StatusCode, [(HeaderName, String); 1], Json<T>);

/// Build a `Located` response pointing at `/<collection>/<id>`.
pub(crate) fn located<T>(status: StatusCode, collection: &str, id: i32, body: T) -> Located<T> {
    (
        status,
        [(header::LOCATION, format!("/{}/{}", collection, id))],
        Json(body),
    )
}
