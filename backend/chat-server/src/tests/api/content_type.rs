use crate::ApiError;
use crate::api::messages::messages::require_json_content_type;

use http::{HeaderMap, HeaderValue, header::CONTENT_TYPE};

fn headers_with(content_type: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers
}

#[test]
fn test_plain_json_content_type_accepted() {
    assert!(require_json_content_type(&headers_with("application/json")).is_ok());
}

#[test]
fn test_json_with_charset_and_mixed_case_accepted() {
    assert!(require_json_content_type(&headers_with("Application/JSON; charset=utf-8")).is_ok());
}

#[test]
fn test_missing_content_type_rejected() {
    let result = require_json_content_type(&HeaderMap::new());
    assert!(matches!(result, Err(ApiError::UnsupportedMediaType { .. })));
}

#[test]
fn test_other_media_types_rejected() {
    for content_type in ["text/plain", "application/xml", "application/jsonp", "json"] {
        let result = require_json_content_type(&headers_with(content_type));
        assert!(result.is_err(), "{content_type} should be rejected");
    }
}
