use crate::{Result as WsErrorResult, WsError};

use std::panic::Location;

use error_location::ErrorLocation;

/// Input checks for submitted messages
pub struct MessageValidator;

impl MessageValidator {
    /// Content must be non-blank and at most `max_length` characters
    #[track_caller]
    pub fn validate_content(content: &str, max_length: usize) -> WsErrorResult<()> {
        if content.trim().is_empty() {
            return Err(WsError::ValidationError {
                message: "content must not be empty".to_string(),
                field: Some("content".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let length = content.chars().count();
        if length > max_length {
            return Err(WsError::ValidationError {
                message: format!(
                    "content must not exceed {} characters, got {}",
                    max_length, length
                ),
                field: Some("content".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
