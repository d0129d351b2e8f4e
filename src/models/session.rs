use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

/// One-shot message shown on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

/// Persisted session (stored in `sessions`, TTL on `expires`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub flash: Vec<FlashMessage>,
    pub expires: BsonDateTime,
    pub last_modified: BsonDateTime,
}

impl SessionRecord {
    pub fn is_expired(&self, now: BsonDateTime) -> bool {
        self.expires <= now
    }
}
