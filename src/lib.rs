//! ShedLog Telegram Bot
//!
//! A Telegram bot for logging when a shared shed is opened and closed.
//! Users walk through a short button-driven dialogue (action, purpose, hour,
//! minute); each completed log is posted to a channel and appended to a
//! Google Sheets worksheet.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ShedLogError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use state::{DialogueEngine, StateStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
