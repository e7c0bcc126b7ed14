use crate::ConfigErrorResult;
use crate::websocket_config::check_range;

use serde::Deserialize;

pub const MIN_CONTENT_LENGTH_LIMIT: usize = 1;
pub const MAX_CONTENT_LENGTH_LIMIT: usize = 65536;
/// Matches the VARCHAR(255) content column
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 255;

/// Limits applied to submitted messages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum message length in characters
    pub max_content_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }
}

impl ValidationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(
            "validation.max_content_length",
            self.max_content_length as u64,
            MIN_CONTENT_LENGTH_LIMIT as u64,
            MAX_CONTENT_LENGTH_LIMIT as u64,
        )
    }
}
