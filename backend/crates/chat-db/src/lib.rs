pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::database_pool::{DatabaseTarget, connect, ping, run_migrations};
pub use error::{DbError, Result};
pub use repositories::message_repository::MessageRepository;
