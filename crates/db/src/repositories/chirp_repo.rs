//! Repository for the `chirps` table.

use chirpy_core::types::DbId;
use sqlx::PgPool;

use crate::models::chirp::{Chirp, ChirpFilter, CreateChirp};

const COLUMNS: &str = "id, created_at, updated_at, body, user_id";

/// Provides CRUD operations for chirps.
pub struct ChirpRepo;

impl ChirpRepo {
    /// Insert a new chirp, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateChirp) -> Result<Chirp, sqlx::Error> {
        let query = format!(
            "INSERT INTO chirps (body, user_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chirp>(&query)
            .bind(&input.body)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Chirp>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chirps WHERE id = $1");
        sqlx::query_as::<_, Chirp>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List chirps, optionally restricted to one author, ordered by creation time.
    pub async fn list(pool: &PgPool, filter: &ChirpFilter) -> Result<Vec<Chirp>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chirps
             WHERE ($1::uuid IS NULL OR user_id = $1)
             {}",
            filter.order_clause()
        );
        sqlx::query_as::<_, Chirp>(&query)
            .bind(filter.author_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a chirp. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
