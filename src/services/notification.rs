//! Notification service implementation
//!
//! Posts a formatted summary of each log entry to the configured Telegram
//! channel, optionally inside a forum topic.

use teloxide::{
    Bot,
    types::{ChatId, MessageId, ParseMode, Recipient, ThreadId},
    requests::Requester,
    prelude::Request,
    payloads::SendMessageSetters,
};
use tracing::{info, error, debug};
use crate::config::ChannelConfig;
use crate::models::LogEntry;
use crate::utils::errors::{NotificationError, NotificationResult, Result};
use crate::utils::helpers::{escape_markdown, truncate_text};

/// Longest purpose included in a channel post, well under Telegram's 4096 limit
pub const PURPOSE_POST_CHARS: usize = 1000;

/// Notification service for channel posts
#[derive(Clone)]
pub struct NotificationService {
    bot: Bot,
    target: Recipient,
    thread_id: Option<ThreadId>,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(bot: Bot, config: &ChannelConfig) -> Result<Self> {
        let target = parse_recipient(&config.chat_id)?;
        let thread_id = config.thread_id.map(|id| ThreadId(MessageId(id)));

        Ok(Self {
            bot,
            target,
            thread_id,
        })
    }

    /// Post a log entry to the channel and return the posted message id
    pub async fn post_log_entry(&self, entry: &LogEntry) -> NotificationResult<String> {
        debug!(target = ?self.target, thread_id = ?self.thread_id, "Posting log entry to channel");

        let mut request = self
            .bot
            .send_message(self.target.clone(), format_log_message(entry))
            .parse_mode(ParseMode::MarkdownV2);

        if let Some(thread_id) = self.thread_id {
            request = request.message_thread_id(thread_id);
        }

        match request.send().await {
            Ok(message) => {
                info!(target = ?self.target, message_id = message.id.0, "Channel notification sent");
                Ok(message.id.0.to_string())
            }
            Err(e) => {
                error!(target = ?self.target, error = %e, "Failed to send channel notification");
                Err(NotificationError::RequestFailed(e.to_string()))
            }
        }
    }
}

/// Parse a configured chat target: `@channelusername` or a numeric chat id
pub fn parse_recipient(chat_id: &str) -> NotificationResult<Recipient> {
    let chat_id = chat_id.trim();
    if chat_id.starts_with('@') && chat_id.len() > 1 {
        return Ok(Recipient::ChannelUsername(chat_id.to_string()));
    }

    chat_id
        .parse::<i64>()
        .map(|id| Recipient::Id(ChatId(id)))
        .map_err(|_| NotificationError::InvalidTarget(chat_id.to_string()))
}

/// Channel message for a log entry, in MarkdownV2
pub fn format_log_message(entry: &LogEntry) -> String {
    format!(
        "📌 *Shed Activity Log*\n\
         👤 *User:* {}\n\
         📌 *Action:* {}\n\
         🎯 *Purpose:* {}\n\
         🕒 *Time:* {} {}\n\
         🧾 *Submitted:* {}",
        escape_markdown(&entry.display_name),
        escape_markdown(entry.action.label()),
        escape_markdown(&truncate_text(&entry.purpose, PURPOSE_POST_CHARS)),
        escape_markdown(&entry.date_string()),
        escape_markdown(&entry.time_string()),
        escape_markdown(&entry.submitted_at_string()),
    )
}
