//! Handlers for the `/actors` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::types::DbId;
use cinema_db::models::actor::{CreateActor, UpdateActor};
use cinema_db::repositories::{ActorRepo, MovieRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, ValidJson};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn actor_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Actor", id })
}

/// POST /api/actors
pub async fn create_actor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateActor>,
) -> AppResult<impl IntoResponse> {
    let actor = ActorRepo::create(&state.pool, &input).await?;

    tracing::info!(actor_id = %actor.id, admin = %admin.subject, "Actor created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: actor })))
}

/// GET /api/actors?limit=&offset=
pub async fn list_actors(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.resolve()?;
    let actors = ActorRepo::list(&state.pool, page).await?;

    Ok(Json(DataResponse { data: actors }))
}

/// GET /api/actors/with-movies?limit=&offset=
///
/// One page of actors, each carrying every movie they appear in.
pub async fn list_actors_with_movies(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.resolve()?;
    let actors = ActorRepo::list_with_movies(&state.pool, page).await?;

    Ok(Json(DataResponse { data: actors }))
}

/// GET /api/actors/{id}
pub async fn get_actor(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    let actor = ActorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| actor_not_found(id))?;

    Ok(Json(DataResponse { data: actor }))
}

/// GET /api/actors/{id}/movies?limit=&offset=
pub async fn list_actor_movies(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.resolve()?;
    if ActorRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(actor_not_found(id));
    }
    let movies = MovieRepo::list_for_actor(&state.pool, id, page).await?;

    Ok(Json(DataResponse { data: movies }))
}

/// PUT /api/actors/{id}
///
/// Coalesce update: omitted fields keep their stored value.
pub async fn update_actor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<UpdateActor>,
) -> AppResult<impl IntoResponse> {
    let actor = ActorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| actor_not_found(id))?;

    tracing::info!(actor_id = %id, admin = %admin.subject, "Actor updated");

    Ok(Json(DataResponse { data: actor }))
}

/// DELETE /api/actors/{id}
///
/// Relation rows are removed with the actor.
pub async fn delete_actor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    if !ActorRepo::delete(&state.pool, id).await? {
        return Err(actor_not_found(id));
    }

    tracing::info!(actor_id = %id, admin = %admin.subject, "Actor deleted");

    Ok(StatusCode::NO_CONTENT)
}
