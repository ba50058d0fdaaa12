//! Handlers for the `/chirps` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chirpy_core::chirp::{clean_body, validate_chirp_body};
use chirpy_core::error::CoreError;
use chirpy_db::models::chirp::{Chirp, ChirpFilter, CreateChirp};
use chirpy_db::repositories::ChirpRepo;
use serde::Deserialize;

use super::parse_id;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ChirpListParams;
use crate::state::AppState;

/// Request body for `POST /api/chirps`. The author comes from the access token.
#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

/// POST /api/chirps
///
/// Validate length, censor profanity, and store the chirp for the caller.
pub async fn create_chirp(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateChirpRequest>,
) -> AppResult<(StatusCode, Json<Chirp>)> {
    validate_chirp_body(&input.body)?;

    let chirp = ChirpRepo::create(
        &state.pool,
        &CreateChirp {
            body: clean_body(&input.body),
            user_id: auth.user_id,
        },
    )
    .await?;

    tracing::info!(chirp_id = %chirp.id, user_id = %auth.user_id, "Chirp created");

    Ok((StatusCode::CREATED, Json(chirp)))
}

/// GET /api/chirps
///
/// List chirps by creation time, optionally for a single author.
pub async fn list_chirps(
    State(state): State<AppState>,
    Query(params): Query<ChirpListParams>,
) -> AppResult<Json<Vec<Chirp>>> {
    let author_id = params
        .author_id
        .as_deref()
        .map(|raw| parse_id(raw, "author_id"))
        .transpose()?;

    let filter = ChirpFilter {
        author_id,
        sort: params.sort,
    };
    let chirps = ChirpRepo::list(&state.pool, &filter).await?;

    Ok(Json(chirps))
}

/// GET /api/chirps/{id}
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Chirp>> {
    let chirp_id = parse_id(&raw_id, "chirp id")?;

    let chirp = ChirpRepo::find_by_id(&state.pool, chirp_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Chirp",
            id: chirp_id,
        }))?;

    Ok(Json(chirp))
}

/// DELETE /api/chirps/{id}
///
/// Only the author may delete a chirp.
pub async fn delete_chirp(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let chirp_id = parse_id(&raw_id, "chirp id")?;

    let chirp = ChirpRepo::find_by_id(&state.pool, chirp_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Chirp",
            id: chirp_id,
        }))?;

    if chirp.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only delete your own chirps".into(),
        )));
    }

    ChirpRepo::delete(&state.pool, chirp_id).await?;

    tracing::info!(%chirp_id, user_id = %auth.user_id, "Chirp deleted");

    Ok(StatusCode::NO_CONTENT)
}
