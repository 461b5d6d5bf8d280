use axum::routing::get;
use axum::Router;

use crate::handlers::actors;
use crate::state::AppState;

/// Routes mounted at `/actors`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(actors::list_actors).post(actors::create_actor))
        .route("/with-movies", get(actors::list_actors_with_movies))
        .route(
            "/{id}",
            get(actors::get_actor)
                .put(actors::update_actor)
                .delete(actors::delete_actor),
        )
        .route("/{id}/movies", get(actors::list_actor_movies))
}
