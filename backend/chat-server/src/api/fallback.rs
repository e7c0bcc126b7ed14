use crate::ApiError;

use std::panic::Location;

use axum::http::{Method, Uri};
use error_location::ErrorLocation;

/// Fallback for unknown paths and for known paths hit with the wrong method
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound {
        message: format!("No route for {} {}", method, uri.path()),
        location: ErrorLocation::from(Location::caller()),
    }
}
