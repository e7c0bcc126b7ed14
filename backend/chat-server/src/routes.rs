use crate::{get_messages, health, index, not_found, send_message};

use chat_ws::{AppState, DISPLAY_MESSAGES_PATH};

use axum::{
    Router,
    routing::{get, post},
};

pub const SEND_MESSAGE_PATH: &str = "/send-message";
pub const GET_MESSAGES_PATH: &str = "/get-messages";
pub const HEALTH_PATH: &str = "/health";

/// Build the application router with all endpoints.
///
/// Wrong methods on known paths answer 404, same as unknown paths. `get`
/// would also serve HEAD, so HEAD is routed to `not_found` explicitly.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).head(not_found).fallback(not_found))
        .route(
            HEALTH_PATH,
            get(health::health).head(not_found).fallback(not_found),
        )
        // Submission and retrieval
        .route(SEND_MESSAGE_PATH, post(send_message).fallback(not_found))
        .route(
            GET_MESSAGES_PATH,
            get(get_messages).head(not_found).fallback(not_found),
        )
        // Delivery channel
        .route(
            DISPLAY_MESSAGES_PATH,
            get(chat_ws::handler).head(not_found).fallback(not_found),
        )
        .fallback(not_found)
        .with_state(state)
}
