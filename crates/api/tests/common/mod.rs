//! Shared helpers for HTTP-level integration tests.
//!
//! Every test builds the production router via [`build_app_router`] and drives
//! it in-process with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use chirpy_api::auth::store::PgAuthStore;
use chirpy_api::auth::AuthService;
use chirpy_api::config::{AuthConfig, ServerConfig};
use chirpy_api::router::build_app_router;
use chirpy_api::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults and `PLATFORM=dev`.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        platform: "dev".to_string(),
        filepath_root: ".".to_string(),
        auth: AuthConfig::with_secret(TEST_SECRET),
    }
}

/// Build application state around `pool` with the Postgres auth store.
pub fn test_state(pool: PgPool, config: ServerConfig) -> AppState {
    let auth = AuthService::new(
        config.auth.clone(),
        Arc::new(PgAuthStore::new(pool.clone())),
    );
    AppState {
        pool,
        config: Arc::new(config),
        auth,
        file_server_hits: Arc::new(AtomicU64::new(0)),
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(test_state(pool, test_config()))
}

/// Same as [`build_test_app`] with a caller-supplied config.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(test_state(pool, config))
}

/// A pool that never connects until first used.
///
/// For tests whose requests are rejected before any query runs.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://postgres@localhost:1/never_used")
        .expect("lazy pool construction does not connect")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    json_request(app, Method::POST, uri, body, None).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    json_request(app, Method::POST, uri, body, Some(token)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    json_request(app, Method::PUT, uri, body, Some(token)).await
}

/// Send a bodyless request with a raw `Authorization` header value.
pub async fn with_authorization(
    app: Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    with_authorization(app, Method::POST, uri, Some(&format!("Bearer {token}"))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    with_authorization(app, Method::DELETE, uri, Some(&format!("Bearer {token}"))).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: Value,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body should be JSON")
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).expect("body should be UTF-8")
}

// ---------------------------------------------------------------------------
// Flow helpers
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "04234-correct-password";

/// Sign up via the API and return the created user JSON.
pub async fn signup(app: Router, email: &str) -> Value {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/users", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Log in via the API and return the JSON containing `token` and `refresh_token`.
pub async fn login(app: Router, email: &str) -> Value {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Sign up and log in, returning `(user_id, access_token, refresh_token)`.
pub async fn signup_and_login(app: Router, email: &str) -> (String, String, String) {
    let user = signup(app.clone(), email).await;
    let session = login(app, email).await;
    (
        user["id"].as_str().unwrap().to_string(),
        session["token"].as_str().unwrap().to_string(),
        session["refresh_token"].as_str().unwrap().to_string(),
    )
}
