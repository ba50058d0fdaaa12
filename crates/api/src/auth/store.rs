//! Persistence contract for the auth façade, with Postgres and in-memory backends.
//!
//! The façade never talks to the database directly. It calls an [`AuthStore`],
//! which owns serialization of conflicting updates to a single token record.

use std::collections::HashMap;

use async_trait::async_trait;
use chirpy_core::types::{Timestamp, UserId};
use chirpy_db::models::refresh_token::CreateRefreshToken;
use chirpy_db::repositories::{RefreshTokenRepo, UserRepo};
use chirpy_db::DbPool;
use tokio::sync::RwLock;

use super::error::StoreError;
use super::refresh::{hash_refresh_token, RefreshToken, RefreshTokenRecord};

/// The fields of a user the login flow needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user_id: UserId,
    pub password_hash: String,
}

/// Storage operations consumed by [`AuthService`](super::service::AuthService).
#[async_trait]
pub trait AuthStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str)
        -> Result<Option<UserCredentials>, StoreError>;

    async fn create_refresh_token(
        &self,
        token: &RefreshToken,
        user_id: UserId,
        expires_at: Timestamp,
    ) -> Result<(), StoreError>;

    /// Look up a token regardless of state. `Ok(None)` means not found.
    async fn get_refresh_token(&self, token: &str)
        -> Result<Option<RefreshTokenRecord>, StoreError>;

    /// Mark a token revoked. Unknown or already-revoked tokens are not an error.
    async fn revoke_refresh_token(&self, token: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

/// [`AuthStore`] backed by the `users` and `refresh_tokens` tables.
#[derive(Debug, Clone)]
pub struct PgAuthStore {
    pool: DbPool,
}

impl PgAuthStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthStore for PgAuthStore {
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        let user = UserRepo::find_by_email(&self.pool, email).await?;
        Ok(user.map(|u| UserCredentials {
            user_id: u.id,
            password_hash: u.hashed_password,
        }))
    }

    async fn create_refresh_token(
        &self,
        token: &RefreshToken,
        user_id: UserId,
        expires_at: Timestamp,
    ) -> Result<(), StoreError> {
        let input = CreateRefreshToken {
            token_hash: hash_refresh_token(token.as_str()),
            user_id,
            expires_at,
        };
        RefreshTokenRepo::create(&self.pool, &input).await?;
        Ok(())
    }

    async fn get_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, StoreError> {
        let row = RefreshTokenRepo::find_by_hash(&self.pool, &hash_refresh_token(token)).await?;
        Ok(row.map(|r| RefreshTokenRecord {
            revoked: r.is_revoked(),
            user_id: r.user_id,
            expires_at: r.expires_at,
        }))
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<(), StoreError> {
        let revoked = RefreshTokenRepo::revoke(&self.pool, &hash_refresh_token(token)).await?;
        if !revoked {
            tracing::debug!("Revoke requested for unknown or already revoked refresh token");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// [`AuthStore`] held entirely in process memory. Tokens are keyed by digest,
/// same as the Postgres store.
#[derive(Debug, Default)]
pub struct MemoryAuthStore {
    users: RwLock<HashMap<String, UserCredentials>>,
    tokens: RwLock<HashMap<String, RefreshTokenRecord>>,
}

impl MemoryAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user that `find_user_by_email` will return.
    pub async fn insert_user(&self, email: &str, credentials: UserCredentials) {
        self.users
            .write()
            .await
            .insert(email.to_string(), credentials);
    }
}

#[async_trait]
impl AuthStore for MemoryAuthStore {
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create_refresh_token(
        &self,
        token: &RefreshToken,
        user_id: UserId,
        expires_at: Timestamp,
    ) -> Result<(), StoreError> {
        let record = RefreshTokenRecord {
            user_id,
            expires_at,
            revoked: false,
        };
        self.tokens
            .write()
            .await
            .insert(hash_refresh_token(token.as_str()), record);
        Ok(())
    }

    async fn get_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, StoreError> {
        Ok(self
            .tokens
            .read()
            .await
            .get(&hash_refresh_token(token))
            .cloned())
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<(), StoreError> {
        if let Some(record) = self.tokens.write().await.get_mut(&hash_refresh_token(token)) {
            record.revoked = true;
        }
        Ok(())
    }
}
