//! Movie↔actor relation-sync operation kinds and input normalization.
//!
//! Relation membership is a set: input order is irrelevant and duplicates
//! collapse to a single pair.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Upper bound on actor ids accepted by a single relation-sync request.
pub const MAX_ACTORS_PER_REQUEST: usize = 500;

/// The three ways a caller can change a movie's cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationOp {
    /// Insert missing pairs, leave existing ones untouched.
    Add,
    /// Drop every pair for the movie, then insert the given set.
    Replace,
    /// Delete exactly the named pairs if present.
    RemoveSelected,
}

impl RelationOp {
    /// Replacing with the empty set clears the cast; the other ops need input.
    pub fn allows_empty(self) -> bool {
        matches!(self, Self::Replace)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Replace => "replace",
            Self::RemoveSelected => "remove_selected",
        }
    }
}

/// Deduplicate `actor_ids` (first occurrence wins) and enforce the size rules
/// for `op`.
pub fn normalize_actor_ids(op: RelationOp, actor_ids: &[DbId]) -> Result<Vec<DbId>, CoreError> {
    if actor_ids.is_empty() && !op.allows_empty() {
        return Err(CoreError::Validation(
            "actor_ids must not be empty".into(),
        ));
    }

    let mut seen = HashSet::with_capacity(actor_ids.len());
    let unique: Vec<DbId> = actor_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    if unique.len() > MAX_ACTORS_PER_REQUEST {
        return Err(CoreError::Validation(format!(
            "actor_ids must contain at most {MAX_ACTORS_PER_REQUEST} distinct ids"
        )));
    }

    Ok(unique)
}

/// Ids from `requested` that are absent from `found`, in request order.
pub fn missing_ids(requested: &[DbId], found: &[DbId]) -> Vec<DbId> {
    let found: HashSet<&DbId> = found.iter().collect();
    requested
        .iter()
        .filter(|id| !found.contains(id))
        .copied()
        .collect()
}
