//! Refresh token model and DTOs.

use chirpy_core::types::{Timestamp, UserId};
use sqlx::FromRow;

/// A row from the `refresh_tokens` table. Keyed by the token's SHA-256 digest.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub token_hash: String,
    pub user_id: UserId,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RefreshToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

/// DTO for storing a newly issued refresh token.
pub struct CreateRefreshToken {
    pub token_hash: String,
    pub user_id: UserId,
    pub expires_at: Timestamp,
}
