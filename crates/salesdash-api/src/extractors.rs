//! Custom axum extractors

use axum::{async_trait, Json};
use serde::de::DeserializeOwned;

use crate::error::{format_validation_errors, ApiError};

pub use salesdash_auth::{CurrentUser, OptionalUser};

/// JSON extractor that runs the body through its `validator` rules
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> axum::extract::FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + validator::Validate,
{
    type Rejection = ApiError;

    async fn from_request(
        req: axum::http::Request<axum::body::Body>,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        value
            .validate()
            .map_err(|e| ApiError::Validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}
