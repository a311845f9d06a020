//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the ShedLog application.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{ShedLogError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer when dropped, so the caller
/// must keep it alive for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| ShedLogError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let file_appender = tracing_appender::rolling::daily(&config.file_path, "shedlog.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| ShedLogError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log the outcome of a log entry submission
pub fn log_submission(user_id: i64, submission_id: &str, notified: bool, persisted: bool) {
    if notified && persisted {
        info!(
            user_id = user_id,
            submission_id = submission_id,
            "Log entry submitted"
        );
    } else {
        warn!(
            user_id = user_id,
            submission_id = submission_id,
            notified = notified,
            persisted = persisted,
            "Log entry submission incomplete"
        );
    }
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log rejected dialogue input
pub fn log_rejected_input(user_id: i64, stage: &str, reason: &str) {
    debug!(
        user_id = user_id,
        stage = stage,
        reason = reason,
        "Dialogue input rejected"
    );
}
