//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{DaloError, Result};
use super::{Settings, StorageBackend};

/// Smallest capacity an auto-scaling classroom can have: an overflow room
/// starts with the owner and the newcomer.
pub const MIN_AUTO_CAPACITY: usize = 2;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_rooms_config(&settings.rooms)?;
    validate_persistence_config(&settings.persistence)?;

    if settings.persistence.backend == StorageBackend::Redis {
        validate_redis_config(&settings.redis)?;
    }

    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate room defaults
fn validate_rooms_config(config: &super::RoomsConfig) -> Result<()> {
    if config.owner_id.trim().is_empty() {
        return Err(DaloError::Config(
            "Room owner ID is required".to_string()
        ));
    }

    if config.owner_name.trim().is_empty() {
        return Err(DaloError::Config(
            "Room owner name is required".to_string()
        ));
    }

    if config.default_capacity < MIN_AUTO_CAPACITY {
        return Err(DaloError::Config(format!(
            "Default capacity must be at least {}",
            MIN_AUTO_CAPACITY
        )));
    }

    if config.group_capacity == 0 {
        return Err(DaloError::Config(
            "Group capacity must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate persistence configuration
fn validate_persistence_config(config: &super::PersistenceConfig) -> Result<()> {
    if config.backend == StorageBackend::File && config.file_path.trim().is_empty() {
        return Err(DaloError::Config(
            "Snapshot file path is required for the file backend".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(DaloError::Config(
            "Redis URL is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(DaloError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(DaloError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.directory.is_empty() || config.file_name.is_empty() {
        return Err(DaloError::Config(
            "Log directory and file name are required".to_string()
        ));
    }

    Ok(())
}
