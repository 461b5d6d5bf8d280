//! HTTP-level integration tests for `/api/movies/{movie_id}/actors`.

mod common;

use axum::http::StatusCode;
use common::{
    actor_ids, body_json, create_actor, create_movie, delete_json, get, post_json, put_json,
    sorted,
};
use sqlx::PgPool;

fn cast_uri(movie_id: &str) -> String {
    format!("/api/movies/{movie_id}/actors")
}

async fn cast_of(pool: &PgPool, movie_id: &str) -> Vec<String> {
    let app = common::build_test_app(pool.clone());
    let response = get(app, &cast_uri(movie_id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    actor_ids(&body_json(response).await)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_returns_resulting_cast(pool: PgPool) {
    let movie = create_movie(&pool, "Inception", 8.8).await;
    let a1 = create_actor(&pool, "Ellen Page").await;
    let a2 = create_actor(&pool, "Tom Hardy").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &cast_uri(&movie),
        serde_json::json!({"actor_ids": [a1, a2]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(actor_ids(&json), sorted(vec![a1.clone(), a2.clone()]));
    assert_eq!(cast_of(&pool, &movie).await, sorted(vec![a1, a2]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_twice_is_idempotent(pool: PgPool) {
    let movie = create_movie(&pool, "Inception", 8.8).await;
    let a1 = create_actor(&pool, "Ellen Page").await;

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            &cast_uri(&movie),
            serde_json::json!({"actor_ids": [a1]}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(cast_of(&pool, &movie).await, vec![a1]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_sets_exact_cast(pool: PgPool) {
    let movie = create_movie(&pool, "Inception", 8.8).await;
    let a1 = create_actor(&pool, "Ellen Page").await;
    let a2 = create_actor(&pool, "Tom Hardy").await;
    let a3 = create_actor(&pool, "Cillian Murphy").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &cast_uri(&movie),
        serde_json::json!({"actor_ids": [a1, a2]}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &cast_uri(&movie),
        serde_json::json!({"actor_ids": [a3, a2]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(cast_of(&pool, &movie).await, sorted(vec![a2, a3]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_with_empty_list_clears_cast(pool: PgPool) {
    let movie = create_movie(&pool, "Inception", 8.8).await;
    let a1 = create_actor(&pool, "Ellen Page").await;

    let app = common::build_test_app(pool.clone());
    post_json(app, &cast_uri(&movie), serde_json::json!({"actor_ids": [a1]})).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &cast_uri(&movie), serde_json::json!({"actor_ids": []})).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(cast_of(&pool, &movie).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_remove_selected_ignores_non_members(pool: PgPool) {
    let movie = create_movie(&pool, "Inception", 8.8).await;
    let a1 = create_actor(&pool, "Ellen Page").await;
    let a2 = create_actor(&pool, "Tom Hardy").await;
    let outsider = create_actor(&pool, "Cillian Murphy").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &cast_uri(&movie),
        serde_json::json!({"actor_ids": [a1, a2]}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete_json(
        app,
        &cast_uri(&movie),
        serde_json::json!({"actor_ids": [a1, outsider]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(cast_of(&pool, &movie).await, vec![a2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_list_rejected_for_add_and_remove(pool: PgPool) {
    let movie = create_movie(&pool, "Inception", 8.8).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &cast_uri(&movie), serde_json::json!({"actor_ids": []})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response =
        delete_json(app, &cast_uri(&movie), serde_json::json!({"actor_ids": []})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_movie_returns_404(pool: PgPool) {
    let a1 = create_actor(&pool, "Ellen Page").await;
    let ghost = uuid::Uuid::new_v4().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &cast_uri(&ghost), serde_json::json!({"actor_ids": [a1]})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = get(app, &cast_uri(&ghost)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_actors_return_404_and_leave_cast_unchanged(pool: PgPool) {
    let movie = create_movie(&pool, "Inception", 8.8).await;
    let a1 = create_actor(&pool, "Ellen Page").await;
    let a2 = create_actor(&pool, "Tom Hardy").await;
    let g1 = uuid::Uuid::new_v4().to_string();
    let g2 = uuid::Uuid::new_v4().to_string();

    let app = common::build_test_app(pool.clone());
    post_json(app, &cast_uri(&movie), serde_json::json!({"actor_ids": [a1]})).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &cast_uri(&movie),
        serde_json::json!({"actor_ids": [a2, g1, g2]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["details"].as_array().unwrap().len(), 2);

    assert_eq!(cast_of(&pool, &movie).await, vec![a1]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_uuid_in_body_returns_400(pool: PgPool) {
    let movie = create_movie(&pool, "Inception", 8.8).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &cast_uri(&movie),
        serde_json::json!({"actor_ids": ["not-a-uuid"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_actor_drops_it_from_cast(pool: PgPool) {
    let movie = create_movie(&pool, "Inception", 8.8).await;
    let a1 = create_actor(&pool, "Ellen Page").await;
    let a2 = create_actor(&pool, "Tom Hardy").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &cast_uri(&movie),
        serde_json::json!({"actor_ids": [a1, a2]}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = common::delete(app, &format!("/api/actors/{a1}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(cast_of(&pool, &movie).await, vec![a2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_movie_id_in_cast_path_returns_json_400(pool: PgPool) {
    let a1 = create_actor(&pool, "Ellen Page").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &cast_uri("not-a-uuid"),
        serde_json::json!({"actor_ids": [a1]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"][0]["field"], "id");
}
