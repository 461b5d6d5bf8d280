//! Request extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use cinema_core::error::{CoreError, FieldError};
use cinema_core::types::DbId;
use cinema_core::validation::validate_payload;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and then checked with `validator`.
///
/// Malformed JSON becomes a 400 `BAD_REQUEST`; validation failures become a
/// 400 `VALIDATION_ERROR` with a `details` list. Both use the same error shape
/// as every other failure, unlike axum's plain-text `Json` rejection.
///
/// ```ignore
/// async fn create(ValidJson(input): ValidJson<CreateMovie>) -> AppResult<impl IntoResponse> {
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        validate_payload(&value)?;
        Ok(Self(value))
    }
}

/// The `{id}` path segment parsed as a UUID.
///
/// A malformed id becomes a 400 `VALIDATION_ERROR` with an `id` detail.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub DbId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Rejected path id");
                AppError::Core(CoreError::InvalidFields(vec![FieldError::new(
                    "id",
                    "must be a valid UUID",
                )]))
            })?;
        Ok(Self(id))
    }
}
