//! Inbound events consumed by the dialogue engine

use crate::models::Action;

/// Callback data prefix of hour buttons
pub const HOUR_PREFIX: &str = "hour_";
/// Callback data prefix of minute buttons
pub const MINUTE_PREFIX: &str = "minute_";

/// A platform event resolved to the user it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Start { user_id: i64, display_name: String },
    ActionChoice { user_id: i64, token: String },
    /// Free text that is not a recognised command
    Text { user_id: i64, text: String },
    HourChoice { user_id: i64, token: String },
    MinuteChoice { user_id: i64, token: String },
    Guideline { user_id: i64 },
    Cancel { user_id: i64 },
}

impl InboundEvent {
    pub fn user_id(&self) -> i64 {
        match self {
            InboundEvent::Start { user_id, .. }
            | InboundEvent::ActionChoice { user_id, .. }
            | InboundEvent::Text { user_id, .. }
            | InboundEvent::HourChoice { user_id, .. }
            | InboundEvent::MinuteChoice { user_id, .. }
            | InboundEvent::Guideline { user_id }
            | InboundEvent::Cancel { user_id } => *user_id,
        }
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Start { .. } => "start",
            InboundEvent::ActionChoice { .. } => "action_choice",
            InboundEvent::Text { .. } => "text",
            InboundEvent::HourChoice { .. } => "hour_choice",
            InboundEvent::MinuteChoice { .. } => "minute_choice",
            InboundEvent::Guideline { .. } => "guideline",
            InboundEvent::Cancel { .. } => "cancel",
        }
    }

    /// Map inline button data to an event; unknown data yields `None`
    pub fn from_callback(user_id: i64, data: &str) -> Option<Self> {
        let token = data.to_string();
        if data.starts_with(HOUR_PREFIX) {
            Some(InboundEvent::HourChoice { user_id, token })
        } else if data.starts_with(MINUTE_PREFIX) {
            Some(InboundEvent::MinuteChoice { user_id, token })
        } else if Action::from_token(data).is_some() {
            Some(InboundEvent::ActionChoice { user_id, token })
        } else {
            None
        }
    }
}
