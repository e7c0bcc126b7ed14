use std::sync::Arc;

/// A published payload as seen by one subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastMessage {
    pub topic: Arc<str>,
    /// Sent to clients verbatim, no envelope
    pub payload: Arc<str>,
}

impl BroadcastMessage {
    pub fn new(topic: impl Into<Arc<str>>, payload: impl Into<Arc<str>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}
