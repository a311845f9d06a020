//! Outbound replies
//!
//! Platform-neutral reply text and keyboard descriptions. The Telegram
//! handlers turn a [`Keyboard`] into concrete markup.

use crate::config::DialogueConfig;
use crate::models::{Action, LogEntry, Stage};
use crate::utils::helpers::truncate_text;

pub const GUIDELINES_TEXT: &str = "📋 Shed Guidelines\n\n\
    1. Log every time you open or close the shed with /start.\n\
    2. Choose the action, enter the purpose, then pick the time it happened.\n\
    3. Lock the shed and return the key after use.\n\
    4. Keep the shed tidy and return equipment where you found it.\n\
    5. Report damaged or missing equipment to the committee.\n\n\
    Use /cancel to abandon a log you have started.";

/// Longest purpose echoed back in a prompt; the stored purpose is untouched
pub const PURPOSE_ECHO_CHARS: usize = 200;

pub const SUBMISSION_FAILED_TEXT: &str = "❌ Error logging data. Try again later.";
pub const NO_ACTIVE_SESSION_TEXT: &str = "❌ Please start the process again using /start.";

/// Keyboard attached to a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    None,
    /// Hide a previously shown reply keyboard
    Remove,
    ActionChoices,
    PurposeSuggestions(Vec<String>),
    HourChoices,
    MinuteChoices { step: u8 },
}

/// Message sent back to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Keyboard::None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = keyboard;
        self
    }
}

pub fn action_prompt() -> Reply {
    Reply::text("Welcome! Select an option:").with_keyboard(Keyboard::ActionChoices)
}

pub fn purpose_prompt(action: Action, config: &DialogueConfig) -> Reply {
    let text = format!(
        "Please enter the purpose for {}:\n(You can type your own or choose a suggestion below)",
        action
    );
    let keyboard = if config.suggested_purposes.is_empty() {
        Keyboard::None
    } else {
        Keyboard::PurposeSuggestions(config.suggested_purposes.clone())
    };
    Reply::text(text).with_keyboard(keyboard)
}

pub fn hour_prompt(purpose: &str) -> Reply {
    Reply::text(format!("Purpose: {}\nSelect the hour:", truncate_text(purpose, PURPOSE_ECHO_CHARS)))
        .with_keyboard(Keyboard::HourChoices)
}

pub fn minute_prompt(hour: u8, config: &DialogueConfig) -> Reply {
    Reply::text(format!("Hour: {:02}\nSelect the minute:", hour))
        .with_keyboard(Keyboard::MinuteChoices { step: config.minute_step })
}

/// Prompt for whatever the stage is waiting on
pub fn stage_prompt(stage: &Stage, config: &DialogueConfig) -> Reply {
    match stage {
        Stage::AwaitingAction => action_prompt(),
        Stage::AwaitingPurpose { action } => purpose_prompt(*action, config),
        Stage::AwaitingHour { purpose, .. } => hour_prompt(purpose),
        Stage::AwaitingMinute { hour, .. } => minute_prompt(*hour, config),
    }
}

/// Explain a rejected input and ask again for the current step
pub fn reprompt(reason: &str, stage: &Stage, config: &DialogueConfig) -> Reply {
    let prompt = stage_prompt(stage, config);
    Reply {
        text: format!("⚠️ {}\n\n{}", reason, prompt.text),
        keyboard: prompt.keyboard,
    }
}

pub fn submission_succeeded(entry: &LogEntry) -> Reply {
    Reply::text(format!(
        "✅ {} logged for '{}' at {}.",
        entry.action,
        truncate_text(&entry.purpose, PURPOSE_ECHO_CHARS),
        entry.time_string()
    ))
    .with_keyboard(Keyboard::Remove)
}

pub fn submission_failed() -> Reply {
    Reply::text(SUBMISSION_FAILED_TEXT).with_keyboard(Keyboard::Remove)
}

pub fn no_active_session() -> Reply {
    Reply::text(NO_ACTIVE_SESSION_TEXT)
}

pub fn guidelines() -> Reply {
    Reply::text(GUIDELINES_TEXT)
}

pub fn cancelled() -> Reply {
    Reply::text("🛑 Log cancelled. Use /start to begin again.").with_keyboard(Keyboard::Remove)
}

pub fn nothing_to_cancel() -> Reply {
    Reply::text("There is no log in progress. Use /start to begin.")
}
