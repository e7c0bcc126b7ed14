use crate::ApiError;

use chat_db::DbError;
use chat_ws::WsError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let (status, json) = body_json(ApiError::NotFound {
        message: "No route for GET /nope".into(),
        location: ErrorLocation::from(Location::caller()),
    })
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "No route for GET /nope");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let (status, json) = body_json(ApiError::Validation {
        message: "content must not be empty".into(),
        field: Some("content".into()),
        location: ErrorLocation::from(Location::caller()),
    })
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "content");
}

#[tokio::test]
async fn test_unsupported_media_type_is_reported_as_400() {
    let (status, json) = body_json(ApiError::UnsupportedMediaType {
        message: "Content-Type must be application/json".into(),
        location: ErrorLocation::from(Location::caller()),
    })
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let (status, json) = body_json(ApiError::Internal {
        message: "boom".into(),
        location: ErrorLocation::from(Location::caller()),
    })
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn test_ws_validation_error_maps_to_validation() {
    let error = ApiError::from(WsError::ValidationError {
        message: "too long".into(),
        field: Some("content".into()),
        location: ErrorLocation::from(Location::caller()),
    });

    assert!(matches!(
        error,
        ApiError::Validation { ref field, .. } if field.as_deref() == Some("content")
    ));
}

#[tokio::test]
async fn test_storage_error_hides_database_details() {
    let db_error = DbError::Initialization {
        message: "disk path /secret/chat.db not writable".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let error = ApiError::from(WsError::from(db_error));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["message"], "Database operation failed");
}
