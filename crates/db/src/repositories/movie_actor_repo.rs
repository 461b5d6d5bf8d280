//! Repository for the `movie_actors` junction table.
//!
//! Every write here runs on a connection borrowed from an open transaction;
//! see [`crate::relation_sync`].

use cinema_core::types::DbId;
use sqlx::PgConnection;

/// Provides set operations on a movie's cast.
pub struct MovieActorRepo;

impl MovieActorRepo {
    /// Insert `(movie_id, actor_id)` pairs, skipping ones that already exist.
    ///
    /// Returns the number of pairs actually inserted.
    pub async fn insert_pairs(
        conn: &mut PgConnection,
        movie_id: DbId,
        actor_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if actor_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO movie_actors (movie_id, actor_id)
             SELECT $1, UNNEST($2::uuid[])
             ON CONFLICT (movie_id, actor_id) DO NOTHING",
        )
        .bind(movie_id)
        .bind(actor_ids)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete every pair for a movie. Returns the number removed.
    pub async fn delete_all_for_movie(
        conn: &mut PgConnection,
        movie_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie_actors WHERE movie_id = $1")
            .bind(movie_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete the named pairs for a movie. Absent pairs are ignored.
    pub async fn delete_pairs(
        conn: &mut PgConnection,
        movie_id: DbId,
        actor_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if actor_ids.is_empty() {
            return Ok(0);
        }
        let result =
            sqlx::query("DELETE FROM movie_actors WHERE movie_id = $1 AND actor_id = ANY($2)")
                .bind(movie_id)
                .bind(actor_ids)
                .execute(conn)
                .await?;
        Ok(result.rows_affected())
    }
}
