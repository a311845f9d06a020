//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod start;
pub mod help;

use teloxide::{Bot, types::Message, utils::command::BotCommands};
use tracing::debug;
use crate::handlers::replies::send_reply;
use crate::state::{DialogueEngine, InboundEvent};
use crate::utils::errors::{Result, ShedLogError};

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "ShedLog commands:")]
pub enum Command {
    #[command(description = "Log opening or closing the shed")]
    Start,
    #[command(description = "Show the shed guidelines")]
    Guidelines,
    #[command(description = "Abandon the log in progress")]
    Cancel,
    #[command(description = "Show help information")]
    Help,
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    engine: DialogueEngine,
) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        ShedLogError::InvalidInput("No user in message".to_string())
    })?;
    let user_id = user.id.0 as i64;

    debug!(user_id = user_id, command = ?cmd, "Processing command");

    match cmd {
        Command::Start => start::handle_start(bot, msg, engine).await,
        Command::Help => help::handle_help(bot, msg).await,
        Command::Guidelines => {
            let reply = engine.handle(InboundEvent::Guideline { user_id }).await;
            send_reply(&bot, msg.chat.id, &reply).await
        }
        Command::Cancel => {
            let reply = engine.handle(InboundEvent::Cancel { user_id }).await;
            send_reply(&bot, msg.chat.id, &reply).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_parse() {
        assert_eq!(Command::parse("/start", "shedlog_bot").ok(), Some(Command::Start));
        assert_eq!(Command::parse("/guidelines", "shedlog_bot").ok(), Some(Command::Guidelines));
        assert_eq!(Command::parse("/cancel@shedlog_bot", "shedlog_bot").ok(), Some(Command::Cancel));
        assert!(Command::parse("/events", "shedlog_bot").is_err());
    }

    #[test]
    fn test_descriptions_list_every_command() {
        let descriptions = Command::descriptions().to_string();
        for command in ["/start", "/guidelines", "/cancel", "/help"] {
            assert!(descriptions.contains(command), "missing {}", command);
        }
    }
}
