use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted chat message. Immutable once the store has assigned its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub received_at: DateTime<Utc>,
}
