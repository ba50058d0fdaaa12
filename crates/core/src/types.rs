/// All primary keys are PostgreSQL UUIDs.
pub type DbId = uuid::Uuid;

/// Identifier of a user; the `sub` claim of every access token.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
