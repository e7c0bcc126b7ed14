use serde::Serialize;

/// Acknowledgement body, serializes to `{}`
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {}
