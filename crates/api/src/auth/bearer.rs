//! `Authorization: Bearer <token>` parsing.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use super::error::HeaderError;

/// Exact, case-sensitive scheme prefix including the single trailing space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the raw token from an `Authorization` header value.
///
/// An absent or empty value is [`HeaderError::MissingHeader`]. Anything not
/// starting with `"Bearer "` followed by at least one character is
/// [`HeaderError::MalformedHeader`]. The token itself is not validated.
pub fn extract_bearer(header_value: Option<&str>) -> Result<&str, HeaderError> {
    let value = header_value
        .filter(|v| !v.is_empty())
        .ok_or(HeaderError::MissingHeader)?;

    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(HeaderError::MalformedHeader),
    }
}

/// Read the `Authorization` header as a string.
///
/// A value that is not visible ASCII is reported as malformed rather than missing.
pub fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, HeaderError> {
    headers
        .get(AUTHORIZATION)
        .map(|v| v.to_str().map_err(|_| HeaderError::MalformedHeader))
        .transpose()
}
