//! Admin endpoints: fileserver metrics and the development reset.

use std::sync::atomic::Ordering;

use axum::extract::State;
use axum::response::Html;
use chirpy_core::error::CoreError;
use chirpy_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /admin/metrics
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    let hits = state.file_server_hits.load(Ordering::Relaxed);
    Html(format!(
        "<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {hits} times!</p>
  </body>
</html>"
    ))
}

/// POST /admin/reset
///
/// Delete every user (chirps and refresh tokens cascade) and zero the hit
/// counter. Only available when `PLATFORM=dev`.
pub async fn reset(State(state): State<AppState>) -> AppResult<&'static str> {
    if !state.config.is_dev() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Reset is only allowed in the dev environment".into(),
        )));
    }

    let deleted = UserRepo::delete_all(&state.pool).await?;
    state.file_server_hits.store(0, Ordering::Relaxed);

    tracing::warn!(deleted, "Development reset: all users deleted");

    Ok("OK")
}
