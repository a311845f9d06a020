//! Error handling for ShedLog
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for ShedLog application
#[derive(Error, Debug)]
pub enum ShedLogError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Dialogue error: {0}")]
    Dialogue(#[from] DialogueError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Token signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised by a dialogue transition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogueError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No active session")]
    NoActiveSession,
}

/// Channel notification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Telegram request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid channel target: {0}")]
    InvalidTarget(String),
}

/// Spreadsheet persistence errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Sheets API request failed: {0}")]
    RequestFailed(String),

    #[error("Sheets API rejected append with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid Sheets API response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for ShedLog operations
pub type Result<T> = std::result::Result<T, ShedLogError>;

/// Result type alias for dialogue transitions
pub type DialogueResult<T> = std::result::Result<T, DialogueError>;

/// Result type alias for channel notifications
pub type NotificationResult<T> = std::result::Result<T, NotificationError>;

/// Result type alias for spreadsheet persistence
pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

impl ShedLogError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ShedLogError::Telegram(_) => true,
            ShedLogError::Notification(_) => true,
            ShedLogError::Persistence(_) => true,
            ShedLogError::Dialogue(_) => true,
            ShedLogError::Config(_) => false,
            ShedLogError::ConfigLoad(_) => false,
            ShedLogError::Http(_) => true,
            ShedLogError::Serialization(_) => false,
            ShedLogError::Io(_) => true,
            ShedLogError::UrlParse(_) => false,
            ShedLogError::Jwt(_) => false,
            ShedLogError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ShedLogError::Config(_) => ErrorSeverity::Critical,
            ShedLogError::ConfigLoad(_) => ErrorSeverity::Critical,
            ShedLogError::Jwt(_) => ErrorSeverity::Critical,
            ShedLogError::Notification(_) => ErrorSeverity::Warning,
            ShedLogError::Dialogue(_) => ErrorSeverity::Info,
            ShedLogError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
