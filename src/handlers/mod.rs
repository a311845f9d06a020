//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for free-text answers
//!
//! Replies from the dialogue engine are rendered by [`replies`].

pub mod commands;
pub mod callbacks;
pub mod messages;
pub mod replies;

// Re-export commonly used handler functions
pub use commands::{handle_command, Command};
pub use callbacks::handle_callback_query;
pub use messages::handle_message;
