use crate::{
    BusConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, LoggingConfig, ServerConfig, ValidationConfig, WebSocketConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub websocket: WebSocketConfig,
    pub bus: BusConfig,
    pub validation: ValidationConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for CHAT_CONFIG_DIR env var, else use ./.chat/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply CHAT_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: CHAT_CONFIG_DIR env var > ./.chat/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.websocket.validate()?;
        self.bus.validate()?;
        self.validation.validate()?;

        if let Some(ref file) = self.logging.file
            && file.trim().is_empty()
        {
            return Err(ConfigError::logging("logging.file cannot be empty"));
        }

        Ok(())
    }

    /// Absolute path of the database file, or None when running in memory
    pub fn database_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        if self.database.in_memory {
            return Ok(None);
        }
        let config_dir = Self::config_dir()?;
        Ok(Some(config_dir.join(&self.database.path)))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections)",
            self.server.host, self.server.port, self.server.max_connections
        );

        if self.database.in_memory {
            info!("  database: in-memory");
        } else {
            info!("  database: {}", self.database.path);
        }

        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );

        info!(
            "  websocket: buffer={}, heartbeat={}s/{}s",
            self.websocket.send_buffer_size,
            self.websocket.heartbeat_interval_secs,
            self.websocket.heartbeat_timeout_secs
        );

        info!("  bus: subscriber_capacity={}", self.bus.subscriber_capacity);
        info!(
            "  validation: max_content_length={}",
            self.validation.max_content_length
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("CHAT_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("CHAT_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "CHAT_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );

        // Database
        Self::apply_env_bool("CHAT_DATABASE_IN_MEMORY", &mut self.database.in_memory);
        Self::apply_env_string("CHAT_DATABASE_PATH", &mut self.database.path);

        // Logging
        Self::apply_env_parse("CHAT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("CHAT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("CHAT_LOG_FILE", &mut self.logging.file);

        // WebSocket
        Self::apply_env_parse(
            "CHAT_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );
        Self::apply_env_parse(
            "CHAT_WS_HEARTBEAT_INTERVAL_SECS",
            &mut self.websocket.heartbeat_interval_secs,
        );
        Self::apply_env_parse(
            "CHAT_WS_HEARTBEAT_TIMEOUT_SECS",
            &mut self.websocket.heartbeat_timeout_secs,
        );

        // Bus
        Self::apply_env_parse(
            "CHAT_BUS_SUBSCRIBER_CAPACITY",
            &mut self.bus.subscriber_capacity,
        );

        // Validation
        Self::apply_env_parse(
            "CHAT_VALIDATION_MAX_CONTENT_LENGTH",
            &mut self.validation.max_content_length,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
