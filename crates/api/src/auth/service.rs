//! The auth façade: the operations request handlers actually call.
//!
//! [`AuthService`] is built once at startup from an [`AuthConfig`], an
//! [`AuthStore`] and a [`Clock`], then cloned into every request. It holds no
//! mutable state of its own.

use std::future::Future;
use std::sync::Arc;

use chirpy_core::types::UserId;

use super::bearer::extract_bearer;
use super::clock::{Clock, SystemClock};
use super::error::{AuthError, StoreError};
use super::jwt::{mint_access_token, validate_access_token};
use super::password::{verify_password, DUMMY_HASH};
use super::refresh::{generate_refresh_token, RefreshToken};
use super::store::AuthStore;
use crate::config::AuthConfig;

/// Tokens issued by a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub access_token: String,
    pub refresh_token: RefreshToken,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Composes password verification, token codecs and the store.
#[derive(Clone)]
pub struct AuthService {
    config: Arc<AuthConfig>,
    store: Arc<dyn AuthStore>,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    /// Create a service that judges expiry by the system clock.
    pub fn new(config: AuthConfig, store: Arc<dyn AuthStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Resolve the user behind an `Authorization` header value.
    ///
    /// Bearer extraction then access-token validation; the first failure is
    /// returned unchanged. No store access.
    pub fn authenticate(&self, header_value: Option<&str>) -> Result<UserId, AuthError> {
        let token = extract_bearer(header_value)?;
        let user_id = validate_access_token(token, self.secret(), self.clock.now())?;
        Ok(user_id)
    }

    /// Mint an access token for `user_id` with the configured lifetime.
    pub fn issue_access_token(&self, user_id: UserId) -> Result<String, AuthError> {
        let token = mint_access_token(
            user_id,
            self.secret(),
            self.config.access_ttl(),
            self.clock.now(),
        )?;
        Ok(token)
    }

    /// Check an email/password pair and open a new session.
    ///
    /// Unknown email and wrong password both yield
    /// [`AuthError::InvalidCredentials`], and both run one Argon2 verification.
    /// A stored hash that cannot be parsed is an internal fault
    /// ([`AuthError::Password`]), not a failed login.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let user = self.bounded(self.store.find_user_by_email(email)).await?;

        let Some(user) = user else {
            let _ = verify_password(password, DUMMY_HASH);
            tracing::debug!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.user_id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.issue_access_token(user.user_id)?;
        let refresh_token = generate_refresh_token()?;
        let expires_at = self.clock.now() + self.config.refresh_ttl();

        self.bounded(
            self.store
                .create_refresh_token(&refresh_token, user.user_id, expires_at),
        )
        .await?;

        tracing::info!(user_id = %user.user_id, "Session issued");

        Ok(Session {
            user_id: user.user_id,
            access_token,
            refresh_token,
            expires_in: self.config.access_token_ttl_secs,
        })
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The refresh token record is left untouched: no rotation, no expiry extension.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let record = self
            .bounded(self.store.get_refresh_token(refresh_token))
            .await?
            .ok_or(AuthError::InvalidOrExpiredRefreshToken)?;

        if !record.is_usable(self.clock.now()) {
            tracing::debug!(
                user_id = %record.user_id,
                revoked = record.revoked,
                "Refresh rejected: token revoked or expired"
            );
            return Err(AuthError::InvalidOrExpiredRefreshToken);
        }

        self.issue_access_token(record.user_id)
    }

    /// Revoke a refresh token. Unknown or already revoked tokens succeed silently.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.bounded(self.store.revoke_refresh_token(refresh_token))
            .await
    }

    fn secret(&self) -> &[u8] {
        self.config.secret.as_bytes()
    }

    /// Run a store call under the configured timeout.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, AuthError> {
        let limit = self.config.store_timeout();
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result.map_err(|e| {
                tracing::error!(error = %e, "Auth store call failed");
                AuthError::StoreUnavailable(e)
            }),
            Err(_) => {
                tracing::error!(timeout = ?limit, "Auth store call timed out");
                Err(AuthError::StoreUnavailable(StoreError::Timeout(limit)))
            }
        }
    }
}
