use crate::{MessageBus, Metrics, Result as WsErrorResult, WsError};

use chat_core::{MESSAGE_TOPIC, Message, NewMessage};
use chat_db::MessageRepository;

use log::{debug, error};
use sqlx::SqlitePool;

/// Persists accepted submissions and then publishes them to live listeners
#[derive(Clone)]
pub struct MessageRelay {
    repository: MessageRepository,
    bus: MessageBus,
    metrics: Metrics,
}

impl MessageRelay {
    pub fn new(pool: SqlitePool, bus: MessageBus, metrics: Metrics) -> Self {
        Self {
            repository: MessageRepository::new(pool),
            bus,
            metrics,
        }
    }

    /// Insert `content` stamped with the current time, then publish it.
    ///
    /// Nothing is published when the insert fails.
    pub async fn submit(&self, content: &str) -> WsErrorResult<Message> {
        let new_message = NewMessage::now(content);

        let message = match self.repository.create(&new_message).await {
            Ok(message) => message,
            Err(e) => {
                error!("Failed to store message: {}", e);
                self.metrics.error_occurred("storage");
                return Err(WsError::from(e));
            }
        };
        self.metrics.message_persisted();

        let receivers = self.bus.publish(MESSAGE_TOPIC, &message.content);
        self.metrics.broadcast_published(receivers);
        debug!("Message {} relayed to {} receivers", message.id, receivers);

        Ok(message)
    }

    /// Every stored message, oldest first
    pub async fn history(&self) -> WsErrorResult<Vec<Message>> {
        Ok(self.repository.find_all().await?)
    }
}
