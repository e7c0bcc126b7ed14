use crate::{ConfigError, ConfigErrorResult, DEFAULT_DATABASE_FILENAME, DEFAULT_DATABASE_IN_MEMORY};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Keep messages in memory only (lost on restart)
    pub in_memory: bool,
    /// SQLite file relative to the config dir, used when `in_memory` is false
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            in_memory: DEFAULT_DATABASE_IN_MEMORY,
            path: String::from(DEFAULT_DATABASE_FILENAME),
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.in_memory {
            return Ok(());
        }

        if self.path.trim().is_empty() {
            return Err(ConfigError::database("database.path cannot be empty"));
        }

        // Database file must stay inside the config dir
        if Path::new(&self.path).is_absolute() || self.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
