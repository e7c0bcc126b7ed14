use chat_core::Message;

use chrono::SecondsFormat;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub id: i64,
    pub content: String,
    /// RFC 3339, UTC
    pub received_at: String,
}

impl From<Message> for MessageDto {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            content: m.content,
            received_at: m.received_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}
