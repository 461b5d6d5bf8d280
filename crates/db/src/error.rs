use cinema_core::error::CoreError;

/// Error returned by operations that combine validation with persistence.
///
/// Plain repository calls return `sqlx::Error` directly; service-level calls
/// such as [`crate::relation_sync::RelationSync`] need to distinguish a
/// missing entity or bad input from a storage failure.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Not found or validation failure. No write was attempted.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The database rejected a statement, the transaction, or the commit.
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
}
