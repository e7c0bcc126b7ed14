use thiserror::Error;

/// Startup and shutdown failures of the server process
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] chat_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] chat_db::DbError),

    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
