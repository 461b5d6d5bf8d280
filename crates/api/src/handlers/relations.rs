//! Handlers for `/movies/{movie_id}/actors` (relation-sync).
//!
//! `POST` adds, `PUT` replaces, `DELETE` removes the listed actors. Each
//! mutation answers with the movie's resulting cast.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::relations::RelationOp;
use cinema_core::types::DbId;
use cinema_db::models::actor::Actor;
use cinema_db::models::movie_actor::ActorIdsRequest;
use cinema_db::relation_sync::RelationSync;
use cinema_db::repositories::{ActorRepo, MovieRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, ValidJson};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// The movie's cast in the standard envelope.
type CastResponse = Json<DataResponse<Vec<Actor>>>;

/// GET /api/movies/{movie_id}/actors
pub async fn list_movie_actors(
    State(state): State<AppState>,
    IdPath(movie_id): IdPath,
) -> AppResult<impl IntoResponse> {
    if !MovieRepo::exists(&state.pool, movie_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        }));
    }
    cast_response(&state, movie_id).await
}

/// POST /api/movies/{movie_id}/actors
pub async fn add_movie_actors(
    admin: RequireAdmin,
    state: State<AppState>,
    path: IdPath,
    body: ValidJson<ActorIdsRequest>,
) -> AppResult<impl IntoResponse> {
    sync(RelationOp::Add, admin, state, path, body).await
}

/// PUT /api/movies/{movie_id}/actors
pub async fn replace_movie_actors(
    admin: RequireAdmin,
    state: State<AppState>,
    path: IdPath,
    body: ValidJson<ActorIdsRequest>,
) -> AppResult<impl IntoResponse> {
    sync(RelationOp::Replace, admin, state, path, body).await
}

/// DELETE /api/movies/{movie_id}/actors
pub async fn remove_movie_actors(
    admin: RequireAdmin,
    state: State<AppState>,
    path: IdPath,
    body: ValidJson<ActorIdsRequest>,
) -> AppResult<impl IntoResponse> {
    sync(RelationOp::RemoveSelected, admin, state, path, body).await
}

async fn sync(
    op: RelationOp,
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(movie_id): IdPath,
    ValidJson(input): ValidJson<ActorIdsRequest>,
) -> AppResult<CastResponse> {
    let change = RelationSync::apply(&state.pool, op, movie_id, &input.actor_ids).await?;

    tracing::debug!(
        movie_id = %movie_id,
        op = change.op.as_str(),
        admin = %admin.subject,
        "Relation sync request completed",
    );

    cast_response(&state, movie_id).await
}

async fn cast_response(
    state: &AppState,
    movie_id: DbId,
) -> AppResult<CastResponse> {
    let actors = ActorRepo::list_for_movie(&state.pool, movie_id).await?;
    Ok(Json(DataResponse { data: actors }))
}
