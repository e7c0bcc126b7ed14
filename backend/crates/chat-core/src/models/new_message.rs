use chrono::{DateTime, Utc};

/// A validated submission that has not been written to the store yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub content: String,
    pub received_at: DateTime<Utc>,
}

impl NewMessage {
    pub fn new(content: impl Into<String>, received_at: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            received_at,
        }
    }

    /// Stamp the submission with the current UTC time
    pub fn now(content: impl Into<String>) -> Self {
        Self::new(content, Utc::now())
    }
}
