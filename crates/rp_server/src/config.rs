//! Configuration management for the roleplay server.
//!
//! Handles loading and validation of the TOML configuration file and the
//! conversion into the runtime [`ServerConfig`].

use crate::cli::CliArgs;
use crate::error::ServerError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application configuration loaded from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Network settings
    pub server: ServerSettings,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Network settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address the WebSocket listener binds to (e.g., "127.0.0.1:8080")
    pub bind_address: String,
    /// Maximum number of concurrent client connections
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_max_connections() -> usize {
    1000
}

/// Logging system configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                bind_address: "127.0.0.1:8080".to_string(),
                max_connections: default_max_connections(),
            },
            logging: LoggingSettings::default(),
        }
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from an existing file
    File,
    /// The file was missing and the defaults were written to it
    CreatedDefault,
}

/// Runtime configuration for [`GameServer`](crate::server::GameServer).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The socket address to bind the listener to
    pub bind_address: SocketAddr,
    /// Maximum number of concurrent connections allowed
    pub max_connections: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_connections: default_max_connections(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, writes the default configuration there and
    /// returns it. Callers report the returned [`ConfigOrigin`] once logging
    /// is up.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the TOML file
    ///
    /// # Returns
    ///
    /// The configuration and whether it was read or freshly created.
    ///
    /// # Errors
    ///
    /// [`ServerError::Io`] when the file can't be read or written, and
    /// [`ServerError::Config`] when its contents aren't valid TOML for
    /// [`AppConfig`].
    pub async fn load_from_file(path: &Path) -> Result<(Self, ConfigOrigin), ServerError> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config = toml::from_str(&content)
                .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
            Ok((config, ConfigOrigin::File))
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)
                .map_err(|e| ServerError::Config(e.to_string()))?;
            tokio::fs::write(path, toml_content).await?;
            Ok((default_config, ConfigOrigin::CreatedDefault))
        }
    }

    /// Applies command-line overrides on top of the file values.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(bind_address) = &args.bind {
            self.server.bind_address = bind_address.clone();
        }
        if let Some(max_connections) = args.max_connections {
            self.server.max_connections = max_connections;
        }
        if let Some(log_level) = &args.log_level {
            self.logging.level = log_level.clone();
        }
        if args.json_logs {
            self.logging.json_format = true;
        }
    }

    /// Validates the configuration for consistency and correctness.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.bind_address.parse::<SocketAddr>().is_err() {
            return Err(format!(
                "Invalid bind address: {}",
                &self.server.bind_address
            ));
        }

        if self.server.max_connections == 0 {
            return Err("max_connections must be greater than zero".to_string());
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {VALID_LOG_LEVELS:?}",
                &self.logging.level
            ));
        }

        Ok(())
    }

    /// Converts the file configuration into the runtime server configuration.
    pub fn to_server_config(&self) -> Result<ServerConfig, ServerError> {
        let bind_address = self.server.bind_address.parse().map_err(|e| {
            ServerError::Config(format!("Invalid bind address {}: {e}", self.server.bind_address))
        })?;
        Ok(ServerConfig {
            bind_address,
            max_connections: self.server.max_connections,
        })
    }
}
