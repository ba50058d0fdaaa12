//! HTTP-level integration tests for the chirps resource.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{body_json, build_test_app, delete_auth, get, post_json_auth, signup_and_login};
use sqlx::PgPool;
use uuid::Uuid;

async fn create_chirp(app: axum::Router, token: &str, body: &str) -> serde_json::Value {
    let response =
        post_json_auth(app, "/api/chirps", serde_json::json!({ "body": body }), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Created chirps belong to the token's user and are censored.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_chirp_cleans_profanity(pool: PgPool) {
    let app = build_test_app(pool);
    let (user_id, token, _) = signup_and_login(app.clone(), "author@example.com").await;

    let chirp = create_chirp(app, &token, "This is a kerfuffle opinion I need to share").await;

    assert_eq!(chirp["body"], "This is a **** opinion I need to share");
    assert_eq!(chirp["user_id"], user_id.as_str());
    assert!(chirp["id"].is_string());
}

/// A body over 140 characters is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_chirp_too_long(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, token, _) = signup_and_login(app.clone(), "verbose@example.com").await;

    let body = serde_json::json!({ "body": "x".repeat(141) });
    let response = post_json_auth(app, "/api/chirps", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// List supports `author_id` filtering and descending sort.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_chirps_filters_and_sorts(pool: PgPool) {
    let app = build_test_app(pool);
    let (alice_id, alice, _) = signup_and_login(app.clone(), "alice@example.com").await;
    let (_, bob, _) = signup_and_login(app.clone(), "bob@example.com").await;

    create_chirp(app.clone(), &alice, "one").await;
    create_chirp(app.clone(), &alice, "two").await;
    create_chirp(app.clone(), &bob, "three").await;

    let all = body_json(get(app.clone(), "/api/chirps").await).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let uri = format!("/api/chirps?author_id={alice_id}&sort=desc");
    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let mine = body_json(response).await;
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|c| c["user_id"] == alice_id.as_str()));
    let created_at = |c: &serde_json::Value| {
        c["created_at"]
            .as_str()
            .unwrap()
            .parse::<DateTime<Utc>>()
            .unwrap()
    };
    assert!(created_at(&mine[0]) >= created_at(&mine[1]));

    let response = get(app, "/api/chirps?author_id=not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Get by id: 200 for existing, 404 for unknown, 400 for malformed ids.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_chirp(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, token, _) = signup_and_login(app.clone(), "reader@example.com").await;
    let chirp = create_chirp(app.clone(), &token, "findable").await;

    let uri = format!("/api/chirps/{}", chirp["id"].as_str().unwrap());
    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["body"], "findable");

    let response = get(app.clone(), &format!("/api/chirps/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, "/api/chirps/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Only the author may delete a chirp.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_chirp_requires_author(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, author, _) = signup_and_login(app.clone(), "owner@example.com").await;
    let (_, other, _) = signup_and_login(app.clone(), "intruder@example.com").await;
    let chirp = create_chirp(app.clone(), &author, "mine").await;
    let uri = format!("/api/chirps/{}", chirp["id"].as_str().unwrap());

    let response = delete_auth(app.clone(), &uri, &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &author).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
