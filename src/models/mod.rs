//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod dialogue;
pub mod log_entry;

// Re-export commonly used models
pub use dialogue::{Action, DialogueRecord, Stage, StageKind};
pub use log_entry::{LogEntry, NOTIFICATION_ID_PLACEHOLDER};
