mod content_type;
mod error;
mod message_dto;
