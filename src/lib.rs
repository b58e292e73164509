//! DaloRooms
//!
//! A room-assignment engine for classrooms and study groups.
//! This library provides auto-scaling classroom families that open a new room
//! when the last one fills up, manual fixed-capacity rooms, a single-writer
//! registry emitting change events, and debounced snapshot persistence.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod models;
pub mod rooms;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{DaloError, Result};

// Re-export main components for easy access
pub use rooms::{resolve_join, JoinOutcome, RoomCollection};
pub use services::ClassroomService;
pub use state::RoomRegistry;
pub use storage::{PersistenceManager, SnapshotStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
