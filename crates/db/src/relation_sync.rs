//! Transactional changes to the set of actors attached to a movie.
//!
//! Every operation follows the same shape:
//!
//! 1. normalize the requested actor ids (dedupe, size rules per op);
//! 2. read-only existence checks for the movie and every actor, outside any
//!    transaction, so a bad request has no side effects and holds no locks;
//! 3. the writes for the op, inside one [`with_transaction`] call.
//!
//! # Concurrency
//!
//! No application-level locking is added. Two calls on the same movie are
//! ordered by commit order under the database's default isolation. A
//! `Replace` whose delete-all commits after a concurrent `Add` inserted a
//! pair will drop that pair. This is a known race and is left as is.

use cinema_core::error::CoreError;
use cinema_core::relations::{missing_ids, normalize_actor_ids, RelationOp};
use cinema_core::types::DbId;
use sqlx::PgConnection;

use crate::models::movie::{CreateMovie, Movie, UpdateMovie};
use crate::models::movie_actor::RelationChange;
use crate::repositories::{ActorRepo, MovieActorRepo, MovieRepo};
use crate::{with_transaction, DbPool, ServiceError};

/// Entry points for relation-sync and for movie writes that carry a cast.
pub struct RelationSync;

impl RelationSync {
    /// Attach the given actors to a movie. Existing pairs are left untouched.
    pub async fn add(
        pool: &DbPool,
        movie_id: DbId,
        actor_ids: &[DbId],
    ) -> Result<RelationChange, ServiceError> {
        Self::apply(pool, RelationOp::Add, movie_id, actor_ids).await
    }

    /// Make the movie's cast exactly `actor_ids`. An empty list clears it.
    pub async fn replace(
        pool: &DbPool,
        movie_id: DbId,
        actor_ids: &[DbId],
    ) -> Result<RelationChange, ServiceError> {
        Self::apply(pool, RelationOp::Replace, movie_id, actor_ids).await
    }

    /// Detach the given actors. Pairs that do not exist are ignored.
    pub async fn remove_selected(
        pool: &DbPool,
        movie_id: DbId,
        actor_ids: &[DbId],
    ) -> Result<RelationChange, ServiceError> {
        Self::apply(pool, RelationOp::RemoveSelected, movie_id, actor_ids).await
    }

    /// Validate, then run `op` in a single transaction.
    pub async fn apply(
        pool: &DbPool,
        op: RelationOp,
        movie_id: DbId,
        actor_ids: &[DbId],
    ) -> Result<RelationChange, ServiceError> {
        let actor_ids = normalize_actor_ids(op, actor_ids)?;
        ensure_movie_exists(pool, movie_id).await?;
        ensure_actors_exist(pool, &actor_ids).await?;

        let change = with_transaction(pool, move |conn| {
            Box::pin(async move {
                let change = write_relations(conn, op, movie_id, &actor_ids).await?;
                Ok::<_, ServiceError>(change)
            })
        })
        .await?;

        tracing::info!(
            movie_id = %movie_id,
            op = op.as_str(),
            added = change.added,
            removed = change.removed,
            "Movie relations updated",
        );
        Ok(change)
    }

    /// Insert a movie and its initial cast in one transaction.
    pub async fn create_movie(pool: &DbPool, input: &CreateMovie) -> Result<Movie, ServiceError> {
        let actor_ids = normalize_actor_ids(RelationOp::Replace, &input.actor_ids)?;
        ensure_actors_exist(pool, &actor_ids).await?;

        let actor_count = actor_ids.len();
        let input = input.clone();
        let movie = with_transaction(pool, move |conn| {
            Box::pin(async move {
                let movie = MovieRepo::create(&mut *conn, &input).await?;
                MovieActorRepo::insert_pairs(&mut *conn, movie.id, &actor_ids).await?;
                Ok::<_, ServiceError>(movie)
            })
        })
        .await?;

        tracing::info!(
            movie_id = %movie.id,
            actor_count,
            "Movie created",
        );
        Ok(movie)
    }

    /// Coalesce-update a movie and, when `actor_ids` is present, replace its
    /// cast, all in one transaction.
    pub async fn update_movie(
        pool: &DbPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Movie, ServiceError> {
        let actor_ids = match &input.actor_ids {
            Some(ids) => Some(normalize_actor_ids(RelationOp::Replace, ids)?),
            None => None,
        };
        ensure_movie_exists(pool, id).await?;
        if let Some(ids) = &actor_ids {
            ensure_actors_exist(pool, ids).await?;
        }

        let input = input.clone();
        let movie = with_transaction(pool, move |conn| {
            Box::pin(async move {
                let movie = MovieRepo::update(&mut *conn, id, &input)
                    .await?
                    .ok_or(CoreError::NotFound { entity: "Movie", id })?;
                if let Some(ids) = &actor_ids {
                    write_relations(&mut *conn, RelationOp::Replace, id, ids).await?;
                }
                Ok::<_, ServiceError>(movie)
            })
        })
        .await?;

        tracing::info!(movie_id = %id, "Movie updated");
        Ok(movie)
    }
}

/// The statements for one relation op, run on a connection inside a
/// transaction.
async fn write_relations(
    conn: &mut PgConnection,
    op: RelationOp,
    movie_id: DbId,
    actor_ids: &[DbId],
) -> Result<RelationChange, sqlx::Error> {
    let (added, removed) = match op {
        RelationOp::Add => {
            let added = MovieActorRepo::insert_pairs(&mut *conn, movie_id, actor_ids).await?;
            (added, 0)
        }
        RelationOp::Replace => {
            let removed = MovieActorRepo::delete_all_for_movie(&mut *conn, movie_id).await?;
            let added = MovieActorRepo::insert_pairs(&mut *conn, movie_id, actor_ids).await?;
            (added, removed)
        }
        RelationOp::RemoveSelected => {
            let removed = MovieActorRepo::delete_pairs(&mut *conn, movie_id, actor_ids).await?;
            (0, removed)
        }
    };

    Ok(RelationChange {
        movie_id,
        added,
        removed,
        op,
    })
}

async fn ensure_movie_exists(pool: &DbPool, movie_id: DbId) -> Result<(), ServiceError> {
    if MovieRepo::exists(pool, movie_id).await? {
        Ok(())
    } else {
        Err(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        }
        .into())
    }
}

/// Fail with the full list of unknown actor ids, if any.
async fn ensure_actors_exist(pool: &DbPool, actor_ids: &[DbId]) -> Result<(), ServiceError> {
    if actor_ids.is_empty() {
        return Ok(());
    }
    let found = ActorRepo::find_existing_ids(pool, actor_ids).await?;
    let missing = missing_ids(actor_ids, &found);
    match missing.as_slice() {
        [] => Ok(()),
        [id] => Err(CoreError::NotFound {
            entity: "Actor",
            id: *id,
        }
        .into()),
        _ => Err(CoreError::NotFoundMany {
            entity: "Actor",
            field: "actor_ids",
            ids: missing,
        }
        .into()),
    }
}
