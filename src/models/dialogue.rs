//! Dialogue record model
//!
//! A user's in-progress dialogue. The stage carries exactly the fields
//! gathered so far, so a record can never hold a later field without the
//! earlier ones.

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};

/// What the user did to the shed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Open,
    Close,
    OpenAndClose,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Open, Action::Close, Action::OpenAndClose];

    /// Callback token carried by the action button
    pub fn token(&self) -> &'static str {
        match self {
            Action::Open => "open",
            Action::Close => "close",
            Action::OpenAndClose => "open & close",
        }
    }

    /// Label shown to users and written to the sheet
    pub fn label(&self) -> &'static str {
        match self {
            Action::Open => "Open",
            Action::Close => "Close",
            Action::OpenAndClose => "Open & Close",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|action| action.token().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stage name without its payload, for logging and stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    AwaitingAction,
    AwaitingPurpose,
    AwaitingHour,
    AwaitingMinute,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageKind::AwaitingAction => "awaiting_action",
            StageKind::AwaitingPurpose => "awaiting_purpose",
            StageKind::AwaitingHour => "awaiting_hour",
            StageKind::AwaitingMinute => "awaiting_minute",
        };
        f.write_str(name)
    }
}

/// Current step of a dialogue together with the answers collected so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    AwaitingAction,
    AwaitingPurpose { action: Action },
    AwaitingHour { action: Action, purpose: String },
    AwaitingMinute { action: Action, purpose: String, hour: u8 },
}

impl Stage {
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::AwaitingAction => StageKind::AwaitingAction,
            Stage::AwaitingPurpose { .. } => StageKind::AwaitingPurpose,
            Stage::AwaitingHour { .. } => StageKind::AwaitingHour,
            Stage::AwaitingMinute { .. } => StageKind::AwaitingMinute,
        }
    }

    pub fn action(&self) -> Option<Action> {
        match self {
            Stage::AwaitingAction => None,
            Stage::AwaitingPurpose { action }
            | Stage::AwaitingHour { action, .. }
            | Stage::AwaitingMinute { action, .. } => Some(*action),
        }
    }

    pub fn purpose(&self) -> Option<&str> {
        match self {
            Stage::AwaitingHour { purpose, .. } | Stage::AwaitingMinute { purpose, .. } => Some(purpose),
            _ => None,
        }
    }

    pub fn hour(&self) -> Option<u8> {
        match self {
            Stage::AwaitingMinute { hour, .. } => Some(*hour),
            _ => None,
        }
    }
}

/// One user's in-progress dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueRecord {
    pub user_id: i64,
    pub display_name: String,
    pub stage: Stage,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DialogueRecord {
    /// Fresh record waiting for an action choice
    pub fn new(user_id: i64, display_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            stage: Stage::AwaitingAction,
            started_at: now,
            updated_at: now,
        }
    }

    /// Same dialogue moved to a new stage
    pub fn advance(&self, stage: Stage, now: DateTime<Utc>) -> Self {
        Self {
            stage,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Whether the record has been idle for longer than `ttl`
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.updated_at > ttl
    }
}
