mod message;
mod new_message;
