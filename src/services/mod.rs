//! Services module
//!
//! External integrations used when a log entry is submitted

pub mod event_store;
pub mod google_auth;
pub mod notification;
pub mod sheets;

// Re-export commonly used services
pub use event_store::{EventStore, ShedEventStore};
pub use google_auth::GoogleAuth;
pub use notification::NotificationService;
pub use sheets::SheetsService;

use std::sync::Arc;
use crate::config::Settings;
use crate::utils::errors::Result;
use teloxide::Bot;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub notification_service: NotificationService,
    pub sheets_service: SheetsService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(bot: Bot, settings: &Settings) -> Result<Self> {
        let notification_service = NotificationService::new(bot, &settings.channel)?;
        let sheets_service = SheetsService::new(settings.sheets.clone())?;

        Ok(Self {
            notification_service,
            sheets_service,
        })
    }

    /// Event store backed by the channel and the log sheet
    pub fn event_store(&self) -> Arc<dyn EventStore> {
        Arc::new(ShedEventStore::new(
            self.notification_service.clone(),
            self.sheets_service.clone(),
        ))
    }
}
