//! Help command handler

use teloxide::{Bot, types::Message, prelude::*, utils::command::BotCommands};
use crate::state::replies::GUIDELINES_TEXT;
use crate::utils::errors::Result;
use super::Command;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, help_text()).await?;
    Ok(())
}

pub fn help_text() -> String {
    format!("🤖 ShedLog Help\n\n{}\n\n{}", Command::descriptions(), GUIDELINES_TEXT)
}
