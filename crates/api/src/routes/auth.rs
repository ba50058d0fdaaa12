//! Route definitions for session endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes merged directly under `/api`.
///
/// ```text
/// POST /login    -> login
/// POST /refresh  -> refresh (Bearer refresh token)
/// POST /revoke   -> revoke  (Bearer refresh token)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/revoke", post(auth::revoke))
}
