use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Edition;

/// A persisted access grant, kept in step with the live server whitelist.
/// `game_id` is already edition-qualified: Bedrock names carry the
/// configured prefix.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WhitelistEntry {
    pub id: i64,
    pub game_id: String,
    /// Platform UUID, best-effort enrichment; absent when lookup failed or
    /// was disabled.
    pub uuid: Option<String>,
    pub edition: Edition,
    pub contact: String,
    pub user_tier: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An entry derived by the approval engine, not yet persisted.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub game_id: String,
    pub uuid: Option<String>,
    pub edition: Edition,
    pub contact: String,
    pub user_tier: String,
}
