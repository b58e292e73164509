//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for room lifecycle, join resolution and snapshot persistence.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::rooms::JoinOutcome;
use crate::utils::errors::{DaloError, Result};

/// Initialize logging based on configuration
///
/// The returned guard must be held for the lifetime of the process, the file
/// writer stops flushing once it is dropped.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| DaloError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false));

    if config.stdout {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| DaloError::Config(format!("Logging already initialized: {}", e)))?;
    } else {
        registry
            .try_init()
            .map_err(|e| DaloError::Config(format!("Logging already initialized: {}", e)))?;
    }

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log room lifecycle events
pub fn log_room_event(room_id: &str, event: &str, details: Option<&str>) {
    info!(
        room_id = room_id,
        event = event,
        details = details,
        "Room event occurred"
    );
}

/// Log the result of a join request
pub fn log_join_outcome(token: &str, participant_id: &str, outcome: &JoinOutcome) {
    match outcome {
        JoinOutcome::Joined { room_id } => {
            info!(token = token, participant_id = participant_id, room_id = %room_id, "Participant joined room");
        }
        JoinOutcome::Spawned { room_id, group_index } => {
            info!(
                token = token,
                participant_id = participant_id,
                room_id = %room_id,
                group_index = group_index,
                "Family full, participant placed in new room"
            );
        }
        JoinOutcome::RoomFull { room_id, .. } => {
            warn!(token = token, participant_id = participant_id, room_id = %room_id, "Join rejected: room is full");
        }
        JoinOutcome::InvalidToken { .. } => {
            debug!(token = token, participant_id = participant_id, "Join ignored: token matches no room");
        }
        JoinOutcome::Fault(fault) => {
            error!(token = token, participant_id = participant_id, fault = %fault, "Join aborted: inconsistent room state");
        }
    }
}

/// Log snapshot persistence operations
pub fn log_persistence(backend: &str, operation: &str, room_count: usize, success: bool) {
    if success {
        debug!(
            backend = backend,
            operation = operation,
            room_count = room_count,
            "Snapshot operation completed"
        );
    } else {
        error!(
            backend = backend,
            operation = operation,
            room_count = room_count,
            "Snapshot operation failed"
        );
    }
}
