use metrics::{counter, gauge};

/// Metrics collector for the relay and its delivery connections
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "chat_ws" }
    }

    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record connection closed, `reason` is a short tag such as `normal` or `heartbeat`
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    pub fn connection_rejected(&self) {
        counter!(format!("{}.connections.rejected", self.prefix)).increment(1);
    }

    pub fn message_sent(&self) {
        counter!(format!("{}.messages.sent", self.prefix)).increment(1);
    }

    pub fn message_persisted(&self) {
        counter!(format!("{}.messages.persisted", self.prefix)).increment(1);
    }

    pub fn broadcast_published(&self, subscriber_count: usize) {
        counter!(format!("{}.broadcast.published", self.prefix)).increment(1);
        gauge!(format!("{}.broadcast.subscribers", self.prefix)).set(subscriber_count as f64);
    }

    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
