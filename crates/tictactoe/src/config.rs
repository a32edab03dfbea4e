//! Application configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an
//! optional TOML file, `TICTACTOE_*` environment variables, and CLI flags.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable overriding the history store URL.
pub const SERVER_URL_ENV: &str = "TICTACTOE_SERVER_URL";

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "TICTACTOE_DB_PATH";

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the history store, used by `play` and `history`.
    server_url: String,
    /// Interface the history store binds.
    host: String,
    /// Port the history store binds.
    port: u16,
    /// SQLite file backing the history store.
    db_path: String,
    /// Entries fetched for the match history list.
    history_limit: usize,
    /// File receiving the terminal shell's logs.
    log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: "tictactoe.db".to_string(),
            history_limit: 50,
            log_file: "tictactoe.log".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file. Missing keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on invalid TOML or mistyped values.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file if it exists, otherwise starts from defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an existing file is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            let config = Self::from_file(path)?;
            info!("Config loaded");
            Ok(config)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies environment overrides read through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(SERVER_URL_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(server_url = %url, "Server URL from environment");
            self.server_url = url;
        }
        if let Some(path) = lookup(DB_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(db_path = %path, "Database path from environment");
            self.db_path = path;
        }
        self
    }

    /// Applies overrides from the process environment.
    pub fn with_process_env(self) -> Self {
        self.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Checks for values no subcommand can work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty URL or database path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.trim().is_empty() {
            return Err(ConfigError::new("server_url must not be empty"));
        }
        if self.db_path.trim().is_empty() {
            return Err(ConfigError::new("db_path must not be empty"));
        }
        Ok(())
    }

    /// Store settings for the `serve` subcommand.
    pub fn server_config(&self) -> tictactoe_server::ServerConfig {
        tictactoe_server::ServerConfig::new(self.host.clone(), self.port, self.db_path.clone())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a configuration error at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server_url(), "http://localhost:8080");
        assert_eq!(*config.port(), 8080);
        assert_eq!(*config.history_limit(), 50);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml("port = 9000\ndb_path = \"games.db\"\n").expect("Parse");
        assert_eq!(*config.port(), 9000);
        assert_eq!(config.db_path(), "games.db");
        assert_eq!(config.host(), "127.0.0.1");
    }

    #[test]
    fn test_bad_toml_rejected() {
        let err = AppConfig::from_toml("port = \"eighty\"").expect_err("Should fail");
        assert!(err.message.contains("Failed to parse config"));
        assert!(AppConfig::from_toml("server_url = \"\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (SERVER_URL_ENV, "http://store:9000"),
            (DB_PATH_ENV, ""),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::default()
            .with_env_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.server_url(), "http://store:9000");
        assert_eq!(config.db_path(), "tictactoe.db");
    }

    #[test]
    fn test_setters_and_server_config() {
        let config = AppConfig::default().with_host("0.0.0.0").with_port(3000u16);
        let server = config.server_config();
        assert_eq!(server.host(), "0.0.0.0");
        assert_eq!(*server.port(), 3000);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().expect("Temp dir");
        let config = AppConfig::load_or_default(dir.path().join("absent.toml")).expect("Load");
        assert_eq!(config, AppConfig::default());
    }
}
