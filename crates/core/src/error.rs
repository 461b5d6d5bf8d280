use serde::Serialize;

use crate::types::DbId;

/// A single field-level validation failure, returned to clients in the
/// `details` array of a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Several referenced ids are missing. `field` names the input that
    /// carried them.
    #[error("Entities not found: {entity} with ids {}", join_ids(.ids))]
    NotFoundMany {
        entity: &'static str,
        field: &'static str,
        ids: Vec<DbId>,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed for one or more fields")]
    InvalidFields(Vec<FieldError>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Render a list of ids as `a, b, c` for error messages.
pub fn join_ids(ids: &[DbId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
