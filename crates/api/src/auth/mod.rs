//! Authentication and token primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 access-token minting and validation.
//! - [`refresh`] -- opaque refresh-token generation and the renewal policy.
//! - [`bearer`] -- `Authorization: Bearer <token>` header parsing.
//! - [`store`] -- the persistence contract the façade relies on, plus implementations.
//! - [`service`] -- [`AuthService`], the façade handlers call.
//! - [`clock`] -- injectable time source for expiry checks.
//! - [`error`] -- the error taxonomy shared by all of the above.

pub mod bearer;
pub mod clock;
pub mod error;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod service;
pub mod store;

pub use error::AuthError;
pub use service::{AuthService, Session};
