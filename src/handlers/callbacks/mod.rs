//! Callback query handlers module
//!
//! Inline button presses for the action, hour and minute steps

use teloxide::{Bot, types::{CallbackQuery, ChatId}, prelude::*};
use tracing::{debug, warn};
use crate::handlers::replies::send_reply;
use crate::state::{DialogueEngine, InboundEvent};
use crate::utils::errors::Result;

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    engine: DialogueEngine,
) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));

    // Clear the loading state on the button
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, callback_id = %query.id, "Failed to answer callback query");
    }

    let Some(data) = query.data.as_deref() else {
        debug!(user_id = user_id, "Callback query without data");
        return Ok(());
    };

    let Some(event) = InboundEvent::from_callback(user_id, data) else {
        warn!(user_id = user_id, callback_data = %data, "Unknown callback data");
        return Ok(());
    };

    debug!(user_id = user_id, event = event.kind(), "Routing callback");
    let reply = engine.handle(event).await;
    send_reply(&bot, chat_id, &reply).await
}
