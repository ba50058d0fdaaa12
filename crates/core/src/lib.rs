//! Domain types and rules shared by the Chirpy crates.
//!
//! This crate has no I/O. It holds the id/timestamp aliases, the domain
//! error type, and the chirp body rules used by the API layer.

pub mod chirp;
pub mod error;
pub mod types;
