pub mod message;
pub mod new_message;
