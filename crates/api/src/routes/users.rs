use axum::routing::post;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST /   -> create_user
/// PUT  /   -> update_user (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(users::create_user).put(users::update_user))
}
