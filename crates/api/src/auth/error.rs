//! Error taxonomy for the auth subsystem.
//!
//! Each component has its own small error enum; [`AuthError`] wraps them
//! unchanged so the façade can surface the first failure as-is.

use std::time::Duration;

/// Failures of the credential hasher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    /// The KDF could not compute a hash (allocation, parameter or RNG failure).
    #[error("password hashing failed: {0}")]
    HashingFailure(String),

    /// The stored hash is not a PHC string this scheme can verify against.
    /// Never a "wrong password".
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Failures of access-token minting or validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("access token signature is invalid")]
    BadSignature,

    #[error("access token has expired")]
    Expired,

    #[error("access token is malformed")]
    MalformedToken,

    #[error("access token was issued by an unexpected issuer")]
    UnexpectedIssuer,

    #[error("access token could not be signed: {0}")]
    SigningFailure(String),
}

/// Failures parsing the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("malformed Authorization header, expected `Bearer <token>`")]
    MalformedHeader,
}

/// The operating system random source could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("entropy source unavailable: {0}")]
pub struct EntropyError(pub String);

/// Failures reported by an [`AuthStore`](super::store::AuthStore) implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Any failure of the auth façade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Header(#[from] HeaderError),

    #[error(transparent)]
    Token(#[from] TokenError),

    /// Refresh token not found, revoked, or past its expiry.
    #[error("invalid or expired refresh token")]
    InvalidOrExpiredRefreshToken,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Entropy(#[from] EntropyError),

    #[error("auth store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl AuthError {
    /// `true` for environment faults that should surface as 5xx rather than 401.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AuthError::Password(_)
                | AuthError::Entropy(_)
                | AuthError::StoreUnavailable(_)
                | AuthError::Token(TokenError::SigningFailure(_))
        )
    }
}
