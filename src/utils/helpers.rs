//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a compact unique suffix for room tokens
///
/// Hyphen-free so that derived `<master>_<index>` codes stay unambiguous.
pub fn generate_token_suffix() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Generate a random number in the given range
pub fn random_in_range(low: u32, high: u32) -> u32 {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    rng.gen_range(low..high)
}

/// Build a generated avatar URL for a display name
pub fn avatar_url(name: &str, background: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background={}&color=fff",
        urlencoding::encode(name),
        background
    )
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
