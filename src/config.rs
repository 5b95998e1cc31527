//! Configuration management for api-session.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file (JSON)
//! 3. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::session::{CredentialSource, EnvCredentialSource, FileCredentialSource};

/// Library configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API client configuration.
    pub api: ApiSection,
    /// Credential bootstrap configuration.
    pub bootstrap: BootstrapSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// API client configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Host every client instance connects to. Defaults to the empty
    /// string, meaning the client library's own default endpoint.
    pub host: String,
}

/// Credential bootstrap configuration section.
///
/// At most one source is consulted, the token file taking precedence over
/// the environment variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapSection {
    /// Path of a token file to restore the credential from at startup.
    pub credential_file: Option<PathBuf>,
    /// Environment variable to restore the credential from at startup.
    pub credential_env: Option<String>,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("API_SESSION_HOST") {
            self.api.host = host;
        }

        if let Ok(path) = std::env::var("API_SESSION_CREDENTIAL_FILE") {
            if !path.is_empty() {
                self.bootstrap.credential_file = Some(PathBuf::from(path));
            }
        }

        if let Ok(var) = std::env::var("API_SESSION_CREDENTIAL_ENV") {
            if !var.is_empty() {
                self.bootstrap.credential_env = Some(var);
            }
        }

        if let Ok(level) = std::env::var("API_SESSION_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Load configuration with the full priority chain.
    ///
    /// Priority: env vars > config file > defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// The configured credential source, if any.
    pub fn credential_source(&self) -> Option<Box<dyn CredentialSource>> {
        if let Some(path) = &self.bootstrap.credential_file {
            return Some(Box::new(FileCredentialSource::new(path.clone())));
        }
        if let Some(var) = &self.bootstrap.credential_env {
            return Some(Box::new(EnvCredentialSource::new(var.clone())));
        }
        None
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
