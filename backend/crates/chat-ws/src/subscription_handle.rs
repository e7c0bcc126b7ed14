use std::sync::Arc;

/// Identifies one listener on one topic
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    id: u64,
    topic: Arc<str>,
}

impl SubscriptionHandle {
    pub(crate) fn new(id: u64, topic: &str) -> Self {
        Self {
            id,
            topic: Arc::from(topic),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}
