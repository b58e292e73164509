//! Test helpers module
//!
//! This module provides utilities for testing the DaloRooms engine: a unified
//! test context and invariant checks over room collections.

pub mod test_context;
pub mod test_data;

pub use test_context::*;
pub use test_data::*;
