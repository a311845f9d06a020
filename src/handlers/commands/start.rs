//! Start command handler
//!
//! Begins a new log for the user, discarding any log already in progress

use teloxide::{Bot, types::Message};
use tracing::info;
use crate::handlers::replies::{send_reply, user_display_name};
use crate::state::{DialogueEngine, InboundEvent};
use crate::utils::errors::{Result, ShedLogError};

/// Handle /start command
pub async fn handle_start(bot: Bot, msg: Message, engine: DialogueEngine) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        ShedLogError::InvalidInput("No user in message".to_string())
    })?;

    let user_id = user.id.0 as i64;
    let display_name = user_display_name(user);

    info!(user_id = user_id, chat_id = ?msg.chat.id, "Starting shed log");

    let reply = engine.handle(InboundEvent::Start { user_id, display_name }).await;
    send_reply(&bot, msg.chat.id, &reply).await
}
