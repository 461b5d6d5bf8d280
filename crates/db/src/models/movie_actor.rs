//! Movie↔actor junction models and relation-sync DTOs.

use cinema_core::relations::RelationOp;
use cinema_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::movie::Movie;

/// A movie joined to one of its actors; used to group movies per actor.
#[derive(Debug, Clone, FromRow)]
pub struct ActorMovieRow {
    pub actor_id: DbId,
    #[sqlx(flatten)]
    pub movie: Movie,
}

/// Request body for `POST|PUT|DELETE /api/movies/{movie_id}/actors`.
///
/// Size and emptiness rules depend on the operation and are enforced by
/// [`cinema_core::relations::normalize_actor_ids`].
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActorIdsRequest {
    pub actor_ids: Vec<DbId>,
}

/// Outcome of a committed relation-sync operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelationChange {
    pub movie_id: DbId,
    /// Pairs newly inserted.
    pub added: u64,
    /// Pairs deleted.
    pub removed: u64,
    #[serde(skip)]
    pub op: RelationOp,
}
