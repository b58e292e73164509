//! Console handlers module
//!
//! This module contains the console front end of the room engine:
//! - Command parsing and per-command handlers
//! - Line handling for raw stdin input

pub mod commands;
pub mod messages;

// Re-export commonly used handler types
pub use commands::{handle_command, Command, CommandContext, Reply};
pub use messages::handle_line;
