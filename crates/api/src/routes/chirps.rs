use axum::routing::get;
use axum::Router;

use crate::handlers::chirps;
use crate::state::AppState;

/// Routes mounted at `/chirps`.
///
/// ```text
/// GET    /       -> list_chirps
/// POST   /       -> create_chirp (requires auth)
/// GET    /{id}   -> get_chirp
/// DELETE /{id}   -> delete_chirp (author only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(chirps::list_chirps).post(chirps::create_chirp))
        .route("/{id}", get(chirps::get_chirp).delete(chirps::delete_chirp))
}
