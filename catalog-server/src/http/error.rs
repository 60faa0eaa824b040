//! API error types with IntoResponse
//!
//! Every failure becomes `{"error": "<message>"}` with a matching status.
//! Database details are logged, never returned.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::{DbError, ForeignKeyViolation};
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed body or path (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: i32 },

    /// Write referenced a parent that does not exist (422)
    MissingParent { parent: &'static str },

    /// Delete blocked by dependent rows (409)
    Conflict(ForeignKeyViolation),

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MissingParent { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id, "lookup missed");
                format!("{} not found", resource)
            }
            Self::MissingParent { parent } => format!("{} not found", parent),
            Self::Conflict(ForeignKeyViolation::HasDependents {
                resource,
                dependents,
                ..
            }) => format!("{} still has {}", resource, dependents),
            Self::Conflict(other) => other.to_string(),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                "Internal server error".to_owned()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::MalformedBody {
            reason: rejection.body_text(),
        })
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::ForeignKey(ForeignKeyViolation::MissingParent { parent }) => {
                Self::MissingParent { parent }
            }
            DbError::ForeignKey(violation) => Self::Conflict(violation),
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}
