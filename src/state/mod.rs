//! State management module
//!
//! This module holds the single owner of the room collection and the events
//! it publishes after each change.

pub mod events;
pub mod registry;

// Re-export commonly used state components
pub use events::RoomEvent;
pub use registry::RoomRegistry;
