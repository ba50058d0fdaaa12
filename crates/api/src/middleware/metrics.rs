//! Fileserver hit counter.

use std::sync::atomic::Ordering;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Increment [`AppState::file_server_hits`] for every request passing through.
pub async fn count_file_server_hits(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    state.file_server_hits.fetch_add(1, Ordering::Relaxed);
    next.run(request).await
}
