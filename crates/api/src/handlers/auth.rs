//! Handlers for login, refresh, and revoke.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chirpy_db::models::user::UserResponse;
use chirpy_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::AuthError;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::BearerToken;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: the user plus both tokens.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Access token (JWT).
    pub token: String,
    /// Opaque refresh token.
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Response for `POST /api/refresh`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let session = state.auth.login(&input.email, &input.password).await?;

    // The user can only vanish here if deleted between the two queries.
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

    Ok(Json(LoginResponse {
        user: user.into(),
        token: session.access_token,
        refresh_token: session.refresh_token.into_string(),
        expires_in: session.expires_in,
    }))
}

/// POST /api/refresh
///
/// Exchange the refresh token in `Authorization: Bearer` for a new access token.
/// The refresh token itself is neither rotated nor extended.
pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> AppResult<Json<TokenResponse>> {
    let token = state.auth.refresh(&refresh_token).await?;
    Ok(Json(TokenResponse { token }))
}

/// POST /api/revoke
///
/// Revoke the refresh token in `Authorization: Bearer`. Returns 204 No Content,
/// including for tokens that were unknown or already revoked.
pub async fn revoke(
    State(state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> AppResult<StatusCode> {
    state.auth.logout(&refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}
