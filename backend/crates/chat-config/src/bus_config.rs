use crate::ConfigErrorResult;
use crate::websocket_config::check_range;

use serde::Deserialize;

pub const MIN_SUBSCRIBER_CAPACITY: usize = 1;
pub const MAX_SUBSCRIBER_CAPACITY: usize = 100000;
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 1000;

/// Broadcast bus settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Messages buffered per subscriber before it starts missing publishes
    pub subscriber_capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            subscriber_capacity: DEFAULT_SUBSCRIBER_CAPACITY,
        }
    }
}

impl BusConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(
            "bus.subscriber_capacity",
            self.subscriber_capacity as u64,
            MIN_SUBSCRIBER_CAPACITY as u64,
            MAX_SUBSCRIBER_CAPACITY as u64,
        )
    }
}
