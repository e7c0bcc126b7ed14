/// Configuration for the message bus
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Queue capacity per subscriber
    pub subscriber_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            subscriber_capacity: 1000,
        }
    }
}
