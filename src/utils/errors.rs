//! Error handling for DaloRooms
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.
//!
//! Join resolution does not use these errors: its rejections are reported
//! as `JoinOutcome` values.

use thiserror::Error;

/// Main error type for DaloRooms
#[derive(Error, Debug)]
pub enum DaloError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Room not found: {room_id}")]
    RoomNotFound { room_id: String },

    #[error("Token already in use: {token}")]
    DuplicateToken { token: String },

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for DaloRooms operations
pub type Result<T> = std::result::Result<T, DaloError>;

impl DaloError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            DaloError::Config(_) => false,
            DaloError::ConfigLoad(_) => false,
            DaloError::RoomNotFound { .. } => false,
            DaloError::DuplicateToken { .. } => false,
            DaloError::Redis(_) => true,
            DaloError::Serialization(_) => false,
            DaloError::Io(_) => true,
            DaloError::Persistence(_) => true,
            DaloError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DaloError::Config(_) => ErrorSeverity::Critical,
            DaloError::ConfigLoad(_) => ErrorSeverity::Critical,
            DaloError::DuplicateToken { .. } => ErrorSeverity::Warning,
            DaloError::RoomNotFound { .. } => ErrorSeverity::Info,
            DaloError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
