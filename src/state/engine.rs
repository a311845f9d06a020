//! Dialogue engine
//!
//! Drives every user through action → purpose → hour → minute. The engine
//! holds no per-user state itself: each event locks the user's slot in
//! [`StateStorage`], applies the pure [`transition`], writes the result back
//! and, on completion, runs the channel post and the sheet append while the
//! slot is still held.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use crate::config::DialogueConfig;
use crate::models::{LogEntry, NOTIFICATION_ID_PLACEHOLDER};
use crate::services::EventStore;
use crate::utils::clock::Clock;
use crate::utils::errors::{DialogueError, DialogueResult, NotificationResult, PersistenceResult};
use crate::utils::helpers::generate_uuid;
use crate::utils::logging::{log_rejected_input, log_submission, log_user_action};
use super::event::InboundEvent;
use super::replies::{self, Reply};
use super::storage::{StateStorage, UserSlot};
use super::transition::{transition, Effect, StoreOp};

/// Outcome of the two writes made for one log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub submission_id: String,
    pub notification: NotificationResult<String>,
    pub persistence: PersistenceResult<()>,
}

impl SubmissionReport {
    pub fn is_success(&self) -> bool {
        self.notification.is_ok() && self.persistence.is_ok()
    }
}

/// The four-step logging dialogue shared by all users
#[derive(Clone)]
pub struct DialogueEngine {
    storage: StateStorage,
    event_store: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
    config: DialogueConfig,
}

impl DialogueEngine {
    pub fn new(
        storage: StateStorage,
        event_store: Arc<dyn EventStore>,
        clock: Arc<dyn Clock>,
        config: DialogueConfig,
    ) -> Self {
        Self {
            storage,
            event_store,
            clock,
            config,
        }
    }

    pub fn storage(&self) -> &StateStorage {
        &self.storage
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.clock.now().with_timezone(&Utc)
    }

    /// Handle an event and always produce a reply; dialogue errors become
    /// reprompts or restart instructions
    pub async fn handle(&self, event: InboundEvent) -> Reply {
        let mut slot = self.storage.lock(event.user_id()).await;

        match self.process(&mut slot, event).await {
            Ok(reply) => reply,
            Err(DialogueError::InvalidInput(reason)) => match slot.get_at(self.now_utc()) {
                Some(record) => replies::reprompt(&reason, &record.stage, &self.config),
                None => replies::no_active_session(),
            },
            Err(DialogueError::NoActiveSession) => replies::no_active_session(),
        }
    }

    /// Handle an event, surfacing dialogue errors to the caller
    pub async fn try_handle(&self, event: InboundEvent) -> DialogueResult<Reply> {
        let mut slot = self.storage.lock(event.user_id()).await;
        self.process(&mut slot, event).await
    }

    async fn process(&self, slot: &mut UserSlot, event: InboundEvent) -> DialogueResult<Reply> {
        let user_id = slot.user_id();
        let event_kind = event.kind();
        let now = self.clock.now();
        let record = slot.get_at(now.with_timezone(&Utc));
        let stage = record.map(|record| record.stage.kind());

        let result = match transition(record, event, &self.config, now) {
            Ok(result) => result,
            Err(e) => {
                let stage_name = stage.map(|s| s.to_string()).unwrap_or_else(|| "none".to_string());
                log_rejected_input(user_id, &stage_name, &e.to_string());
                return Err(e);
            }
        };

        match result.store {
            StoreOp::Keep => {}
            StoreOp::Put(record) => slot.put(record),
            StoreOp::Remove => {
                slot.remove();
            }
        }

        log_user_action(user_id, event_kind, stage.map(|s| s.to_string()).as_deref());

        let mut reply = result.reply;
        for effect in result.effects {
            match effect {
                Effect::Submit(entry) => {
                    let report = self.submit(&entry).await;
                    log_submission(user_id, &report.submission_id, report.notification.is_ok(), report.persistence.is_ok());
                    reply = Some(if report.is_success() {
                        replies::submission_succeeded(&entry)
                    } else {
                        replies::submission_failed()
                    });
                }
            }
        }

        Ok(reply.unwrap_or_else(|| {
            warn!(user_id = user_id, event = event_kind, "Transition produced no reply");
            match slot.get_at(now.with_timezone(&Utc)) {
                Some(record) => replies::stage_prompt(&record.stage, &self.config),
                None => replies::action_prompt(),
            }
        }))
    }

    /// Post the entry, then append it to the sheet
    ///
    /// The append runs even when the post failed, carrying the placeholder id.
    /// Neither error escapes; both are captured in the report.
    pub async fn submit(&self, entry: &LogEntry) -> SubmissionReport {
        let submission_id = generate_uuid();
        info!(
            submission_id = %submission_id,
            user = %entry.display_name,
            action = %entry.action,
            "Submitting log entry"
        );

        let notification = self.event_store.notify(entry).await;
        if let Err(e) = &notification {
            warn!(submission_id = %submission_id, error = %e, "Channel post failed, appending with placeholder id");
        }

        let notification_id = notification
            .as_deref()
            .unwrap_or(NOTIFICATION_ID_PLACEHOLDER)
            .to_string();
        let persistence = self.event_store.append(entry, &notification_id).await;
        if let Err(e) = &persistence {
            warn!(submission_id = %submission_id, error = %e, "Sheet append failed");
        }

        SubmissionReport {
            submission_id,
            notification,
            persistence,
        }
    }
}
