//! Shared query parameter types for API handlers.

use chirpy_db::models::chirp::SortOrder;
use serde::Deserialize;

/// Query parameters for `GET /api/chirps` (`?author_id=&sort=asc|desc`).
///
/// `author_id` is kept as a string so a malformed id can be reported as a
/// JSON 400 rather than axum's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ChirpListParams {
    pub author_id: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
}
