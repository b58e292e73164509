//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `DALO_ROOMS__DEFAULT_CAPACITY=12`
pub const ENV_PREFIX: &str = "DALO";

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub rooms: RoomsConfig,
    pub persistence: PersistenceConfig,
    pub redis: RedisConfig,
    pub logging: LoggingConfig,
}

/// Room creation defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoomsConfig {
    /// Representative placed first in every classroom
    pub owner_id: String,
    pub owner_name: String,
    /// Capacity used when a classroom request does not name one
    pub default_capacity: usize,
    /// Capacity of user-created basic groups
    pub group_capacity: usize,
}

/// Snapshot storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Redis,
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Redis => write!(f, "redis"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Snapshot persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub backend: StorageBackend,
    pub file_path: String,
    /// Quiet period after the last change before a snapshot is written
    pub debounce_ms: u64,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    /// Snapshot expiry, 0 keeps it forever
    pub ttl_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_name: String,
    pub stdout: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config")
    }

    /// Load settings from a specific configuration file (extension optional)
    /// layered under the environment
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::DaloError> {
        super::validation::validate_settings(self)
    }
}

impl Default for RoomsConfig {
    fn default() -> Self {
        Self {
            owner_id: "admin_founder".to_string(),
            owner_name: "Founder".to_string(),
            default_capacity: 8,
            group_capacity: 50,
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            file_path: "data/rooms.json".to_string(),
            debounce_ms: 2000,
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            prefix: "dalo:".to_string(),
            ttl_seconds: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
            file_name: "dalo-rooms.log".to_string(),
            stdout: false,
        }
    }
}
