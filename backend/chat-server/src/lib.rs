pub mod api;
pub mod application;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    fallback::not_found,
    messages::{
        message_dto::MessageDto,
        messages::{get_messages, index, send_message},
        send_message_request::SendMessageRequest,
        send_message_response::SendMessageResponse,
    },
};
pub use application::Application;
pub use error::ServerError;

pub use crate::routes::{GET_MESSAGES_PATH, HEALTH_PATH, SEND_MESSAGE_PATH, build_router};
