#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use cinema_api::auth::jwt::{generate_access_token, JwtConfig};
use cinema_api::config::ServerConfig;
use cinema_api::router::build_app_router;
use cinema_api::state::AppState;
use cinema_core::roles::ROLE_ADMIN;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

const TEST_SECRET: &str = "integration-test-secret-that-is-long-enough";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        db_max_connections: 5,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over the given pool, with the same
/// middleware stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A valid bearer token with the `admin` role.
pub fn admin_token() -> String {
    generate_access_token("test-admin", ROLE_ADMIN, &test_config().jwt).unwrap()
}

/// A valid bearer token with the `user` role.
pub fn user_token() -> String {
    generate_access_token("test-user", "user", &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

/// POST as admin.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(&admin_token())).await
}

/// PUT as admin.
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(&admin_token())).await
}

/// DELETE with a JSON body, as admin.
pub async fn delete_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(body), Some(&admin_token())).await
}

/// DELETE without a body, as admin.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(&admin_token())).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a movie through the API and return its id.
pub async fn create_movie(pool: &PgPool, title: &str, rating: f64) -> String {
    let body = serde_json::json!({
        "title": title,
        "description": format!("About {title}"),
        "release_date": "2010-07-16",
        "rating": rating,
    });
    let response = post_json(build_test_app(pool.clone()), "/api/movies", body).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create an actor through the API and return its id.
pub async fn create_actor(pool: &PgPool, name: &str) -> String {
    let body = serde_json::json!({
        "name": name,
        "gender": "female",
        "date_of_birth": "1987-02-21",
    });
    let response = post_json(build_test_app(pool.clone()), "/api/actors", body).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Sorted actor ids from a `{ "data": [actor, ...] }` body.
pub fn actor_ids(json: &serde_json::Value) -> Vec<String> {
    let mut ids: Vec<String> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

pub fn sorted(mut ids: Vec<String>) -> Vec<String> {
    ids.sort();
    ids
}
