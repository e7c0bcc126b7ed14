//! Message REST API handlers

use crate::{ApiError, ApiResult, MessageDto, SendMessageRequest, SendMessageResponse};

use chat_ws::{AppState, MessageValidator};

use std::panic::Location;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
};
use error_location::ErrorLocation;
use log::debug;

const JSON_MEDIA_TYPE: &str = "application/json";

/// GET /
pub async fn index() -> StatusCode {
    StatusCode::OK
}

/// POST /send-message
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<SendMessageResponse>> {
    // 1. Content-Type must be JSON
    require_json_content_type(&headers)?;

    // 2. Body must be a readable JSON object with a string `content`
    let body = body.map_err(|e| ApiError::BadRequest {
        message: format!("Unreadable body: {}", e.body_text()),
        location: ErrorLocation::from(Location::caller()),
    })?;
    let request = parse_request(&body)?;
    let content = request.content.ok_or_else(|| ApiError::Validation {
        message: "content is required".to_string(),
        field: Some("content".into()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // 3. Non-blank, within the column limit
    MessageValidator::validate_content(&content, state.max_content_length)?;

    // 4. Persist, then publish
    let message = state.relay().submit(&content).await?;
    debug!("Accepted message {}", message.id);

    Ok(Json(SendMessageResponse {}))
}

/// GET /get-messages
pub async fn get_messages(State(state): State<AppState>) -> ApiResult<Json<Vec<MessageDto>>> {
    let messages = state.relay().history().await?;

    Ok(Json(messages.into_iter().map(MessageDto::from).collect()))
}

/// Accepts `application/json` in any case, with or without parameters
pub(crate) fn require_json_content_type(headers: &HeaderMap) -> ApiResult<()> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::UnsupportedMediaType {
            message: format!("Content-Type must be {}", JSON_MEDIA_TYPE),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let media_type = content_type.split(';').next().unwrap_or_default().trim();
    if media_type.eq_ignore_ascii_case(JSON_MEDIA_TYPE) {
        return Ok(());
    }

    Err(ApiError::UnsupportedMediaType {
        message: format!(
            "Content-Type must be {}, got {}",
            JSON_MEDIA_TYPE, content_type
        ),
        location: ErrorLocation::from(Location::caller()),
    })
}

fn parse_request(body: &[u8]) -> ApiResult<SendMessageRequest> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ApiError::BadRequest {
            message: format!("Invalid JSON body: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    if !value.is_object() {
        return Err(ApiError::BadRequest {
            message: "Body must be a JSON object".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    serde_json::from_value(value).map_err(|e| ApiError::Validation {
        message: format!("Invalid content: {}", e),
        field: Some("content".into()),
        location: ErrorLocation::from(Location::caller()),
    })
}
