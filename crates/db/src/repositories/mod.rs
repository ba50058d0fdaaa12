//! Repository structs: one per table, each a namespace of async query functions.

pub mod chirp_repo;
pub mod refresh_token_repo;
pub mod user_repo;

pub use chirp_repo::ChirpRepo;
pub use refresh_token_repo::RefreshTokenRepo;
pub use user_repo::UserRepo;
