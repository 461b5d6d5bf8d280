//! Handlers for the `/movies` resource.
//!
//! Reads are public. Writes require the `admin` role and run through
//! [`RelationSync`] so that a cast supplied with the movie is written in the
//! same transaction as the movie row.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_db::models::movie::{CreateMovie, Movie, MovieWithActors, UpdateMovie};
use cinema_db::relation_sync::RelationSync;
use cinema_db::repositories::{ActorRepo, MovieRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, ValidJson};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{MovieListParams, MovieSearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/movies
///
/// Create a movie, optionally with an initial `actor_ids` list.
pub async fn create_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateMovie>,
) -> AppResult<impl IntoResponse> {
    let movie = RelationSync::create_movie(&state.pool, &input).await?;
    let body = with_actors(&state, movie).await?;

    tracing::info!(movie_id = %body.movie.id, admin = %admin.subject, "Movie created via API");

    Ok((StatusCode::CREATED, Json(DataResponse { data: body })))
}

/// GET /api/movies?limit=&offset=&sortBy=&order=
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page.resolve()?;
    let movies = MovieRepo::list(&state.pool, params.sort(), page).await?;

    Ok(Json(DataResponse { data: movies }))
}

/// GET /api/movies/search?title=&actor=&limit=&offset=
///
/// Case-insensitive substring match on title and/or cast member name.
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieSearchParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page.resolve()?;
    let search = params.search()?;
    let movies = MovieRepo::search(&state.pool, &search, page).await?;

    Ok(Json(DataResponse { data: movies }))
}

/// GET /api/movies/{id}
///
/// The movie together with its cast.
pub async fn get_movie(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id,
        }))?;
    let body = with_actors(&state, movie).await?;

    Ok(Json(DataResponse { data: body }))
}

/// PUT /api/movies/{id}
///
/// Coalesce update. When `actor_ids` is present the cast is replaced too.
pub async fn update_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<UpdateMovie>,
) -> AppResult<impl IntoResponse> {
    let movie = RelationSync::update_movie(&state.pool, id, &input).await?;
    let body = with_actors(&state, movie).await?;

    tracing::info!(movie_id = %id, admin = %admin.subject, "Movie updated via API");

    Ok(Json(DataResponse { data: body }))
}

/// DELETE /api/movies/{id}
///
/// Relation rows are removed with the movie.
pub async fn delete_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    if !MovieRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id,
        }));
    }

    tracing::info!(movie_id = %id, admin = %admin.subject, "Movie deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn with_actors(state: &AppState, movie: Movie) -> AppResult<MovieWithActors> {
    let actors = ActorRepo::list_for_movie(&state.pool, movie.id).await?;
    Ok(MovieWithActors { movie, actors })
}
