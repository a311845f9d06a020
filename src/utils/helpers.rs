//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Current wall-clock time in the given offset
pub fn now_in_offset(offset: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset)
}

/// Build a fixed offset from whole hours east of UTC
pub fn offset_from_hours(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}

/// Human-readable label for a Telegram user: the username, else the full name
pub fn display_name(username: Option<&str>, first_name: &str, last_name: Option<&str>) -> String {
    if let Some(username) = username.filter(|u| !u.trim().is_empty()) {
        return username.to_string();
    }

    match last_name.filter(|l| !l.trim().is_empty()) {
        Some(last) => format!("{} {}", first_name, last),
        None => first_name.to_string(),
    }
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape MarkdownV2 special characters
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|' | '{' | '}' | '.' | '!'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
