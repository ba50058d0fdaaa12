//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod chirps;
pub mod users;

use chirpy_core::types::DbId;

use crate::error::{AppError, AppResult};

/// Parse a path or query id, reporting a malformed value as 400.
pub(crate) fn parse_id(raw: &str, what: &str) -> AppResult<DbId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {what}: {raw}")))
}
