pub mod actors;
pub mod health;
pub mod movies;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /movies                          list (GET), create (POST, admin)
/// /movies/search                   search by title and/or actor (GET)
/// /movies/{id}                     get, update, delete
/// /movies/{movie_id}/actors        cast: list, add, replace, remove
///
/// /actors                          list (GET), create (POST, admin)
/// /actors/with-movies              actors with their movies (GET)
/// /actors/{id}                     get, update, delete
/// /actors/{id}/movies              movies of an actor (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/movies", movies::router())
        .nest("/actors", actors::router())
}
