//! Chirp entity model and DTOs.

use chirpy_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A chirp row from the `chirps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chirp {
    pub id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub body: String,
    pub user_id: UserId,
}

/// DTO for inserting a chirp. `body` is stored as given; cleaning happens upstream.
#[derive(Debug)]
pub struct CreateChirp {
    pub body: String,
    pub user_id: UserId,
}

/// Sort direction for chirp listings, by `created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filters for [`crate::repositories::ChirpRepo::list`].
#[derive(Debug, Default)]
pub struct ChirpFilter {
    pub author_id: Option<UserId>,
    pub sort: SortOrder,
}

impl ChirpFilter {
    pub(crate) fn order_clause(&self) -> String {
        format!("ORDER BY created_at {}, id {}", self.sort.as_sql(), self.sort.as_sql())
    }
}
