//! Custom Axum extractors
//!
//! Both reject with `ApiError`, so bad input is a JSON 400 before any
//! repository runs.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{EntityId, Validate, ValidationError};

/// Extract and validate an entity id from path
pub struct ValidId(pub EntityId);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "id",
                    reason: "must be a positive integer",
                })
            })?;

        Ok(Self(EntityId::parse(&id)?))
    }
}

/// JSON body that decoded and passed [`Validate`]; anything else is a 400
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state).await?;
        body.validate()?;
        Ok(Self(body))
    }
}
