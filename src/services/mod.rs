//! Services module
//!
//! This module contains business logic services

pub mod classroom;

// Re-export commonly used services
pub use classroom::{ClassroomService, generate_guest};
