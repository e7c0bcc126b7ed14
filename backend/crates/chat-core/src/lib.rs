pub mod models;

#[cfg(test)]
mod tests;

pub use models::message::Message;
pub use models::new_message::NewMessage;

/// The single bus topic every accepted chat message is published on
pub const MESSAGE_TOPIC: &str = "message:send";
