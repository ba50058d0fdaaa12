//! HTTP-level integration tests for signup, login, refresh, and revoke.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, login, post_auth, post_json, put_json_auth, signup,
    signup_and_login, TEST_PASSWORD,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

/// Signup returns 201 with the user and never the password hash.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_returns_user_without_hash(pool: PgPool) {
    let app = build_test_app(pool);
    let json = signup(app, "walt@breakingbad.com").await;

    assert!(json["id"].is_string());
    assert!(json["created_at"].is_string());
    assert!(json["updated_at"].is_string());
    assert_eq!(json["email"], "walt@breakingbad.com");
    assert!(json.get("hashed_password").is_none());
}

/// A second signup with the same email returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_duplicate_email(pool: PgPool) {
    let app = build_test_app(pool);
    signup(app.clone(), "dup@example.com").await;

    let body = serde_json::json!({ "email": "dup@example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/users", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Empty email or short password is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_validation(pool: PgPool) {
    let app = build_test_app(pool);

    let body = serde_json::json!({ "email": "", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/users", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "email": "short@example.com", "password": "short" });
    let response = post_json(app, "/api/users", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with the user, `token`, and `refresh_token`.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let app = build_test_app(pool);
    let user = signup(app.clone(), "login@example.com").await;

    let json = login(app, "login@example.com").await;

    assert_eq!(json["id"], user["id"]);
    assert_eq!(json["email"], "login@example.com");
    assert!(json["token"].is_string(), "response must contain token");
    assert_eq!(json["token"].as_str().unwrap().split('.').count(), 3);
    assert_eq!(json["refresh_token"].as_str().unwrap().len(), 64);
    assert_eq!(json["expires_in"], 3600);
}

/// Unknown email and wrong password produce byte-identical responses.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let app = build_test_app(pool);
    signup(app.clone(), "real@example.com").await;

    let wrong_password = post_json(
        app.clone(),
        "/api/login",
        serde_json::json!({ "email": "real@example.com", "password": "incorrect_password" }),
    )
    .await;
    let unknown_email = post_json(
        app,
        "/api/login",
        serde_json::json!({ "email": "ghost@example.com", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(wrong_password).await;
    assert_eq!(wrong_password["error"], "Incorrect email or password");
    assert_eq!(wrong_password, body_json(unknown_email).await);
}

/// The access token from login authenticates a protected endpoint.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_access_token_authenticates_update(pool: PgPool) {
    let app = build_test_app(pool);
    let (user_id, token, _) = signup_and_login(app.clone(), "before@example.com").await;

    let body = serde_json::json!({ "email": "after@example.com", "password": "a-new-password" });
    let response = put_json_auth(app.clone(), "/api/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], user_id.as_str());
    assert_eq!(json["email"], "after@example.com");

    // The new credentials work; the old ones do not.
    let response = post_json(
        app.clone(),
        "/api/login",
        serde_json::json!({ "email": "after@example.com", "password": "a-new-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app,
        "/api/login",
        serde_json::json!({ "email": "before@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Refresh and revoke
// ---------------------------------------------------------------------------

/// A refresh token yields a new, working access token, repeatedly, without rotating.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_issues_access_token(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, _, refresh_token) = signup_and_login(app.clone(), "refresher@example.com").await;

    for _ in 0..2 {
        let response = post_auth(app.clone(), "/api/refresh", &refresh_token).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let token = json["token"].as_str().expect("refresh must return token");
        assert!(json.get("refresh_token").is_none(), "refresh token is not rotated");

        let body = serde_json::json!({ "body": "fresh token works" });
        let response = common::post_json_auth(app.clone(), "/api/chirps", body, token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

/// An access token is not accepted where a refresh token is expected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rejects_access_token(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, access_token, _) = signup_and_login(app.clone(), "mixup@example.com").await;

    let response = post_auth(app, "/api/refresh", &access_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Refreshing with a garbage token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_with_unknown_token(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_auth(app, "/api/refresh", "not-a-real-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired refresh token");
}

/// After revoke, the refresh token no longer works; revoking again is still 204.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_revoke_then_refresh_fails(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, _, refresh_token) = signup_and_login(app.clone(), "leaver@example.com").await;

    let response = post_auth(app.clone(), "/api/revoke", &refresh_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_auth(app.clone(), "/api/refresh", &refresh_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_auth(app.clone(), "/api/revoke", &refresh_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_auth(app, "/api/revoke", "never-issued").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// Revoking one session leaves another session of the same user usable.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sessions_are_independent(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, _, phone) = signup_and_login(app.clone(), "multi@example.com").await;
    let laptop = login(app.clone(), "multi@example.com").await["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = post_auth(app.clone(), "/api/revoke", &phone).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_auth(app, "/api/refresh", &laptop).await;
    assert_eq!(response.status(), StatusCode::OK);
}
