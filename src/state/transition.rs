//! Pure dialogue transitions
//!
//! Given the user's current record and an inbound event, decide what happens
//! to the record, what to reply, and whether a log entry must be submitted.
//! No I/O happens here.

use chrono::{DateTime, FixedOffset, Utc};
use crate::config::DialogueConfig;
use crate::models::{Action, DialogueRecord, LogEntry, Stage};
use crate::utils::errors::{DialogueError, DialogueResult};
use super::event::{InboundEvent, HOUR_PREFIX, MINUTE_PREFIX};
use super::replies::{self, Reply};

/// What to do with the stored record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Keep,
    Put(DialogueRecord),
    Remove,
}

/// Side effect to run after the record is updated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post the entry to the channel, then append it to the sheet
    Submit(LogEntry),
}

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub store: StoreOp,
    /// `None` when the reply depends on the outcome of an effect
    pub reply: Option<Reply>,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    fn new(store: StoreOp, reply: Reply) -> Self {
        Self {
            store,
            reply: Some(reply),
            effects: vec![],
        }
    }

    fn submit(entry: LogEntry) -> Self {
        Self {
            store: StoreOp::Remove,
            reply: None,
            effects: vec![Effect::Submit(entry)],
        }
    }
}

/// Apply one event to the user's dialogue
pub fn transition(
    record: Option<&DialogueRecord>,
    event: InboundEvent,
    config: &DialogueConfig,
    now: DateTime<FixedOffset>,
) -> DialogueResult<TransitionResult> {
    let now_utc = now.with_timezone(&Utc);

    match (record, event) {
        // Start always begins from scratch, discarding any earlier record
        (_, InboundEvent::Start { user_id, display_name }) => {
            let record = DialogueRecord::new(user_id, display_name, now_utc);
            Ok(TransitionResult::new(StoreOp::Put(record), replies::action_prompt()))
        }

        (_, InboundEvent::Guideline { .. }) => {
            Ok(TransitionResult::new(StoreOp::Keep, replies::guidelines()))
        }

        (Some(_), InboundEvent::Cancel { .. }) => {
            Ok(TransitionResult::new(StoreOp::Remove, replies::cancelled()))
        }
        (None, InboundEvent::Cancel { .. }) => {
            Ok(TransitionResult::new(StoreOp::Keep, replies::nothing_to_cancel()))
        }

        (None, _) => Err(DialogueError::NoActiveSession),

        (Some(record), InboundEvent::ActionChoice { token, .. }) => match &record.stage {
            Stage::AwaitingAction => {
                let action = Action::from_token(&token).ok_or_else(|| {
                    DialogueError::InvalidInput(format!("Unknown option '{}'", token))
                })?;
                let next = record.advance(Stage::AwaitingPurpose { action }, now_utc);
                Ok(TransitionResult::new(StoreOp::Put(next), replies::purpose_prompt(action, config)))
            }
            _ => Err(DialogueError::InvalidInput("The action has already been chosen".to_string())),
        },

        (Some(record), InboundEvent::Text { text, .. }) => match &record.stage {
            Stage::AwaitingPurpose { action } => {
                let purpose = text.trim();
                if purpose.is_empty() {
                    return Err(DialogueError::InvalidInput("The purpose cannot be empty".to_string()));
                }
                let next = record.advance(
                    Stage::AwaitingHour { action: *action, purpose: purpose.to_string() },
                    now_utc,
                );
                Ok(TransitionResult::new(StoreOp::Put(next), replies::hour_prompt(purpose)))
            }
            _ => Err(DialogueError::InvalidInput("Please use the buttons to answer".to_string())),
        },

        (Some(record), InboundEvent::HourChoice { token, .. }) => match &record.stage {
            Stage::AwaitingHour { action, purpose } => {
                let hour = parse_choice(&token, HOUR_PREFIX, 23, "Hour")?;
                let next = record.advance(
                    Stage::AwaitingMinute { action: *action, purpose: purpose.clone(), hour },
                    now_utc,
                );
                Ok(TransitionResult::new(StoreOp::Put(next), replies::minute_prompt(hour, config)))
            }
            _ => Err(DialogueError::InvalidInput("That hour selection has expired".to_string())),
        },

        (Some(record), InboundEvent::MinuteChoice { token, .. }) => match &record.stage {
            Stage::AwaitingMinute { action, purpose, hour } => {
                let minute = parse_choice(&token, MINUTE_PREFIX, 59, "Minute")?;
                let entry = LogEntry::new(record.display_name.clone(), *action, purpose.clone(), *hour, minute, now)
                    .ok_or_else(|| {
                        DialogueError::InvalidInput(format!("{:02}:{:02} is not a valid time", hour, minute))
                    })?;
                Ok(TransitionResult::submit(entry))
            }
            _ => Err(DialogueError::InvalidInput("That minute selection has expired".to_string())),
        },
    }
}

/// Parse `<prefix><n>` and check `0 <= n <= max`
fn parse_choice(token: &str, prefix: &str, max: u8, label: &str) -> DialogueResult<u8> {
    let out_of_range = || DialogueError::InvalidInput(format!("{} must be between 0 and {}", label, max));

    let raw = token
        .trim()
        .strip_prefix(prefix)
        .ok_or_else(|| DialogueError::InvalidInput(format!("Unrecognised {} selection", label.to_lowercase())))?;
    let value: i64 = raw.parse().map_err(|_| out_of_range())?;

    u8::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or_else(out_of_range)
}
