use axum::routing::get;
use axum::Router;

use crate::handlers::{movies, relations};
use crate::state::AppState;

/// Routes mounted at `/movies`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list_movies).post(movies::create_movie))
        .route("/search", get(movies::search_movies))
        .route(
            "/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route(
            "/{id}/actors",
            get(relations::list_movie_actors)
                .post(relations::add_movie_actors)
                .put(relations::replace_movie_actors)
                .delete(relations::remove_movie_actors),
        )
}
