//! Message handlers module
//!
//! Free-text answers, such as the purpose of a visit

use teloxide::{Bot, types::Message, prelude::*};
use tracing::debug;
use crate::handlers::replies::send_reply;
use crate::state::{DialogueEngine, InboundEvent};
use crate::utils::errors::Result;
use crate::utils::helpers::truncate_text;

pub const UNKNOWN_COMMAND_TEXT: &str = "Unknown command. Use /help to see what I can do.";

/// Handle incoming messages that are not recognised commands
pub async fn handle_message(bot: Bot, msg: Message, engine: DialogueEngine) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        debug!(chat_id = ?msg.chat.id, "Ignoring non-text message");
        return Ok(());
    };

    let user_id = user.id.0 as i64;
    debug!(user_id = user_id, text = %truncate_text(text, 64), "Processing text message");

    if text.starts_with('/') {
        debug!(user_id = user_id, text = %text, "Unknown command");
        bot.send_message(msg.chat.id, UNKNOWN_COMMAND_TEXT).await?;
        return Ok(());
    }

    let reply = engine
        .handle(InboundEvent::Text { user_id, text: text.to_string() })
        .await;
    send_reply(&bot, msg.chat.id, &reply).await
}
