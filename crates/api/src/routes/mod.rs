pub mod admin;
pub mod auth;
pub mod chirps;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /healthz                       service and database health
///
/// /login                         login (public)
/// /refresh                       new access token (Bearer refresh token)
/// /revoke                        revoke refresh token (Bearer refresh token)
///
/// /users                         create (public), update (auth required)
///
/// /chirps                        list (public), create (auth required)
/// /chirps/{id}                   get (public), delete (author only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/chirps", chirps::router())
}
