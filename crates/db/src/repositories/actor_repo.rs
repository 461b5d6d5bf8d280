//! Repository for the `actors` table.

use std::collections::HashMap;

use cinema_core::listing::Pagination;
use cinema_core::types::DbId;
use cinema_core::validation::normalize_gender;
use sqlx::PgPool;

use crate::models::actor::{Actor, ActorWithMovies, CreateActor, UpdateActor};
use crate::models::movie_actor::ActorMovieRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, gender, date_of_birth, created_at, updated_at";

/// Provides CRUD operations for actors.
pub struct ActorRepo;

impl ActorRepo {
    /// Insert a new actor, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateActor) -> Result<Actor, sqlx::Error> {
        let query = format!(
            "INSERT INTO actors (name, gender, date_of_birth)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(input.name.trim())
            .bind(normalize_gender(&input.gender))
            .bind(input.date_of_birth)
            .fetch_one(pool)
            .await
    }

    /// Find an actor by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors WHERE id = $1");
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of actors ordered by name.
    pub async fn list(pool: &PgPool, page: Pagination) -> Result<Vec<Actor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM actors ORDER BY name ASC, id ASC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Of the given ids, return those that exist.
    pub async fn find_existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar::<_, DbId>("SELECT id FROM actors WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// The cast of a movie, ordered by name.
    pub async fn list_for_movie(pool: &PgPool, movie_id: DbId) -> Result<Vec<Actor>, sqlx::Error> {
        let query = "SELECT a.id, a.name, a.gender, a.date_of_birth, a.created_at, a.updated_at
             FROM actors a
             JOIN movie_actors ma ON ma.actor_id = a.id
             WHERE ma.movie_id = $1
             ORDER BY a.name ASC, a.id ASC";
        sqlx::query_as::<_, Actor>(query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    /// One page of actors, each with every movie they appear in.
    ///
    /// Issues two queries (the page, then all movies for that page) and
    /// groups in memory. Actors with no movies get an empty list.
    pub async fn list_with_movies(
        pool: &PgPool,
        page: Pagination,
    ) -> Result<Vec<ActorWithMovies>, sqlx::Error> {
        let actors = Self::list(pool, page).await?;
        if actors.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = actors.iter().map(|a| a.id).collect();
        let rows = sqlx::query_as::<_, ActorMovieRow>(
            "SELECT ma.actor_id, m.id, m.title, m.description, m.release_date, m.rating,
                    m.created_at, m.updated_at
             FROM movie_actors ma
             JOIN movies m ON m.id = ma.movie_id
             WHERE ma.actor_id = ANY($1)
             ORDER BY m.release_date ASC, m.id ASC",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;

        let mut by_actor: HashMap<DbId, Vec<_>> = HashMap::with_capacity(actors.len());
        for row in rows {
            by_actor.entry(row.actor_id).or_default().push(row.movie);
        }

        Ok(actors
            .into_iter()
            .map(|actor| {
                let movies = by_actor.remove(&actor.id).unwrap_or_default();
                ActorWithMovies { actor, movies }
            })
            .collect())
    }

    /// Update an actor. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActor,
    ) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!(
            "UPDATE actors SET
                name = COALESCE($2, name),
                gender = COALESCE($3, gender),
                date_of_birth = COALESCE($4, date_of_birth)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.gender.as_deref().map(normalize_gender))
            .bind(input.date_of_birth)
            .fetch_optional(pool)
            .await
    }

    /// Delete an actor by ID. Relation rows go with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
