use crate::Result as DbErrorResult;

use chat_core::{Message, NewMessage};

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

/// Append-only access to the `message` table
#[derive(Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct MessageRow {
    id: i64,
    content: String,
    received_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            received_at: row.received_at,
        }
    }
}

impl MessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a message and return it with its store-assigned id
    pub async fn create(&self, message: &NewMessage) -> DbErrorResult<Message> {
        let result = sqlx::query(
            r#"
              INSERT INTO message (content, received_at)
              VALUES (?, ?)
              "#,
        )
        .bind(&message.content)
        .bind(message.received_at)
        .execute(&self.pool)
        .await?;

        Ok(Message {
            id: result.last_insert_rowid(),
            content: message.content.clone(),
            received_at: message.received_at,
        })
    }

    /// All messages in insertion order
    pub async fn find_all(&self) -> DbErrorResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
              SELECT id, content, received_at
              FROM message
              ORDER BY id ASC
              "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Message>> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
              SELECT id, content, received_at
              FROM message
              WHERE id = ?
              "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Message::from))
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM message")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
