use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cinema_core::error::{CoreError, FieldError};
use cinema_db::ServiceError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the shape `{ "error", "code", "details"? }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cinema_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(core) => AppError::Core(core),
            ServiceError::Persistence(db) => AppError::Database(db),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::NotFoundMany { entity, ids, .. } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{} {entity} ids not found", ids.len()),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidFields(_) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Validation failed for one or more fields".to_string(),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(details) = self.details() {
            body["details"] = json!(details);
        }

        (status, axum::Json(body)).into_response()
    }
}

impl AppError {
    /// Field-level detail list for errors that carry one.
    fn details(&self) -> Option<Vec<FieldError>> {
        match self {
            AppError::Core(CoreError::InvalidFields(fields)) => Some(fields.clone()),
            AppError::Core(CoreError::NotFoundMany { entity, field, ids }) => Some(
                ids.iter()
                    .map(|id| FieldError::new(*field, format!("{entity} with id {id} not found")))
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations (`23505`) map to 409.
/// - Foreign key violations (`23503`) map to 409: a referenced movie or actor
///   was deleted between the existence check and the write.
/// - Everything else maps to 500 with a sanitized message.
///
/// Constraint names are logged, never returned.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint();
            match db_err.code().as_deref() {
                Some("23505") => {
                    tracing::warn!(constraint = ?constraint, "Unique violation");
                    (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        "Resource already exists".to_string(),
                    )
                }
                Some("23503") => {
                    tracing::warn!(constraint = ?constraint, "Foreign key violation");
                    (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Referenced {} no longer exists", referenced_entity(constraint)),
                    )
                }
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Entity kind behind a `movie_actors` foreign key.
fn referenced_entity(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("fk_movie_actors_movie") => "movie",
        Some("fk_movie_actors_actor") => "actor",
        _ => "resource",
    }
}
