use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: chirpy_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Authentication façade (token validation, login, refresh, logout).
    pub auth: AuthService,
    /// Number of requests served under `/app` since startup or the last reset.
    pub file_server_hits: Arc<AtomicU64>,
}
