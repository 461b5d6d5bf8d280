//! Repository for the `movies` table.

use cinema_core::listing::{MovieSort, Pagination};
use cinema_core::search::MovieSearch;
use cinema_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::movie::{CreateMovie, Movie, UpdateMovie};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, release_date, rating, created_at, updated_at";

/// Same columns qualified with the `m` alias for JOIN queries.
const M_COLUMNS: &str = "m.id, m.title, m.description, m.release_date, m.rating, \
    m.created_at, m.updated_at";

/// Provides CRUD, listing and search for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    ///
    /// Takes a connection so the insert can share a transaction with the
    /// initial cast.
    pub async fn create(conn: &mut PgConnection, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, description, release_date, rating)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(input.release_date)
            .bind(input.rating)
            .fetch_one(conn)
            .await
    }

    /// Find a movie by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Existence check run before opening a write transaction.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List one page of movies in the requested order.
    ///
    /// The `ORDER BY` body comes from [`MovieSort`], which only ever yields
    /// allow-listed column names.
    pub async fn list(
        pool: &PgPool,
        sort: MovieSort,
        page: Pagination,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies ORDER BY {} LIMIT $1 OFFSET $2",
            sort.order_by_clause()
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Movies whose title and/or cast member names contain the given fragments.
    ///
    /// A `None` pattern disables that filter. Results are distinct movies
    /// ordered by title.
    pub async fn search(
        pool: &PgPool,
        search: &MovieSearch,
        page: Pagination,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {M_COLUMNS} FROM movies m
             WHERE ($1::text IS NULL OR m.title ILIKE $1)
               AND ($2::text IS NULL OR EXISTS (
                     SELECT 1 FROM movie_actors ma
                     JOIN actors a ON a.id = ma.actor_id
                     WHERE ma.movie_id = m.id AND a.name ILIKE $2))
             ORDER BY m.title ASC, m.id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(search.title_pattern.as_deref())
            .bind(search.actor_pattern.as_deref())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Movies an actor appears in, ordered by release date.
    pub async fn list_for_actor(
        pool: &PgPool,
        actor_id: DbId,
        page: Pagination,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {M_COLUMNS} FROM movies m
             JOIN movie_actors ma ON ma.movie_id = m.id
             WHERE ma.actor_id = $1
             ORDER BY m.release_date ASC, m.id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(actor_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a movie. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                release_date = COALESCE($4, release_date),
                rating = COALESCE($5, rating)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.release_date)
            .bind(input.rating)
            .fetch_optional(conn)
            .await
    }

    /// Delete a movie by ID. Relation rows go with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
