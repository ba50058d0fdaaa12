//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chirpy_core::error::CoreError;
use chirpy_db::models::user::{CreateUser, UserResponse};
use chirpy_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::auth::AuthError;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /api/users` and `PUT /api/users`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl CredentialsRequest {
    /// Check the fields and return the trimmed email plus the password hash.
    fn into_validated(self) -> AppResult<(String, String)> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Email must not be empty".into(),
            )));
        }
        validate_password_strength(&self.password, MIN_PASSWORD_LENGTH)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

        let hashed = hash_password(&self.password).map_err(AuthError::from)?;
        Ok((email.to_string(), hashed))
    }
}

/// POST /api/users
///
/// Sign up. Returns 201 with the new user (never the hash).
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let (email, hashed_password) = input.into_validated()?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            hashed_password,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/users
///
/// Replace the authenticated user's email and password.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<UserResponse>> {
    let (email, hashed_password) = input.into_validated()?;

    let user = UserRepo::update_credentials(&state.pool, auth.user_id, &email, &hashed_password)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = %user.id, "User credentials updated");

    Ok(Json(user.into()))
}
