//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod message;
pub mod room;

// Re-export commonly used models
pub use user::{User, AccountType};
pub use message::{Message, MessageSender};
pub use room::{Room, RoomKind, RoomSummary, CreateClassroomRequest, family_room_code, family_room_name};
