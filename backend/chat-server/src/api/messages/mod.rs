pub mod message_dto;
pub mod messages;
pub mod send_message_request;
pub mod send_message_response;
