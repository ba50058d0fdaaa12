//! Opaque refresh tokens.
//!
//! A refresh token is 32 bytes from the OS CSPRNG, hex-encoded to 64
//! characters. Unlike access tokens it says nothing about itself: validity
//! comes from a store lookup. Only its SHA-256 digest is persisted.

use std::fmt;

use chirpy_core::types::{Timestamp, UserId};
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::{Digest, Sha256};

use super::error::EntropyError;

/// Number of random bytes in a refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Length of the hex-encoded token string.
pub const REFRESH_TOKEN_LEN: usize = REFRESH_TOKEN_BYTES * 2;

/// A freshly generated refresh token (the plaintext the client holds).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RefreshToken(String);

impl RefreshToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshToken(<redacted>)")
    }
}

/// Generate a cryptographically random refresh token.
///
/// Fails only if the operating system random source cannot be read.
pub fn generate_refresh_token() -> Result<RefreshToken, EntropyError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| EntropyError(e.to_string()))?;
    Ok(RefreshToken(hex::encode(bytes)))
}

/// Compute the SHA-256 hex digest of a refresh token.
///
/// Use this to compare an incoming refresh token against the stored hash.
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// What the store knows about a refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub user_id: UserId,
    pub expires_at: Timestamp,
    pub revoked: bool,
}

impl RefreshTokenRecord {
    /// Renewal policy: usable while not revoked and `now < expires_at`.
    pub fn is_usable(&self, now: Timestamp) -> bool {
        !self.revoked && now < self.expires_at
    }
}
