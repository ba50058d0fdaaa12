//! Request extractors and middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::BearerToken`] -- Extracts the raw bearer token (used for refresh tokens).
//! - [`metrics::count_file_server_hits`] -- Counts requests to the static file server.

pub mod auth;
pub mod metrics;
