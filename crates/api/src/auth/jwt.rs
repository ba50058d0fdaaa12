//! HS256 access-token minting and validation.
//!
//! Access tokens are self-contained JWTs carrying a [`Claims`] payload. Nothing
//! is stored server-side: validity is a pure function of the token, the
//! signing secret, and the current time. Expiry is checked here against the
//! caller's `now` rather than by `jsonwebtoken`, so the time source stays
//! injectable.

use chirpy_core::types::{Timestamp, UserId};
use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::TokenError;

/// Value of the `iss` claim on every token this service mints.
pub const ISSUER: &str = "chirpy";

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: UserId,
    /// Issuer, always [`ISSUER`] for tokens minted here.
    pub iss: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4) for audit. Optional on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Mint an HS256 access token for `subject` that expires at `now + ttl`.
pub fn mint_access_token(
    subject: UserId,
    secret: &[u8],
    ttl: Duration,
    now: Timestamp,
) -> Result<String, TokenError> {
    let iat = now.timestamp();
    let claims = Claims {
        sub: subject,
        iss: ISSUER.to_string(),
        iat,
        exp: iat + ttl.num_seconds(),
        jti: Some(Uuid::new_v4().to_string()),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::SigningFailure(e.to_string()))
}

/// Validate an access token and return its subject.
///
/// Checks run in a fixed order: signature, then expiry against `now`, then
/// issuer. A token is expired once `now >= exp`. A correctly signed token
/// whose claims do not decode (including a `sub` that is not a UUID) is
/// [`TokenError::MalformedToken`].
pub fn validate_access_token(
    token: &str,
    secret: &[u8],
    now: Timestamp,
) -> Result<UserId, TokenError> {
    let claims = decode_claims(token, secret)?;

    if now.timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }
    if claims.iss != ISSUER {
        return Err(TokenError::UnexpectedIssuer);
    }
    Ok(claims.sub)
}

/// Verify the signature and decode the claims without judging expiry or issuer.
pub fn decode_claims(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(classify)
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidIssuer => TokenError::UnexpectedIssuer,
        _ => TokenError::MalformedToken,
    }
}
