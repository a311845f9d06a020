//! Event store boundary
//!
//! The two external writes made when a dialogue completes: a channel post and
//! a spreadsheet row.

use async_trait::async_trait;
use tracing::{debug, error};
use crate::models::LogEntry;
use crate::utils::errors::{NotificationResult, PersistenceResult};
use crate::utils::logging::log_api_error;
use super::notification::NotificationService;
use super::sheets::SheetsService;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Post the entry to the notification channel, returning the message id
    async fn notify(&self, entry: &LogEntry) -> NotificationResult<String>;

    /// Append the entry to the log sheet
    async fn append(&self, entry: &LogEntry, notification_id: &str) -> PersistenceResult<()>;
}

/// Telegram channel + Google Sheets event store
#[derive(Clone)]
pub struct ShedEventStore {
    notification_service: NotificationService,
    sheets_service: SheetsService,
}

impl ShedEventStore {
    pub fn new(notification_service: NotificationService, sheets_service: SheetsService) -> Self {
        Self {
            notification_service,
            sheets_service,
        }
    }
}

#[async_trait]
impl EventStore for ShedEventStore {
    async fn notify(&self, entry: &LogEntry) -> NotificationResult<String> {
        match self.notification_service.post_log_entry(entry).await {
            Ok(message_id) => {
                debug!(message_id = %message_id, "Log entry posted to channel");
                Ok(message_id)
            }
            Err(e) => {
                log_api_error("telegram", &e.to_string(), Some("channel post"));
                Err(e)
            }
        }
    }

    async fn append(&self, entry: &LogEntry, notification_id: &str) -> PersistenceResult<()> {
        let row = entry.to_row(notification_id);
        match self.sheets_service.append_row(&row).await {
            Ok(updated_range) => {
                debug!(updated_range = ?updated_range, "Log entry appended to sheet");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to append log entry");
                log_api_error("sheets", &e.to_string(), Some("append row"));
                Err(e)
            }
        }
    }
}
