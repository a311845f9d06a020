//! Rendering of dialogue replies as Telegram messages

use teloxide::{
    Bot,
    payloads::SendMessageSetters,
    prelude::*,
    types::{
        ChatId, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
        KeyboardRemove, ReplyMarkup, User,
    },
};
use tracing::debug;
use crate::models::Action;
use crate::state::event::{HOUR_PREFIX, MINUTE_PREFIX};
use crate::state::{Keyboard, Reply};
use crate::utils::errors::Result;
use crate::utils::helpers::display_name;

const BUTTONS_PER_ROW: usize = 6;

/// Send a reply to a chat with its keyboard
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: &Reply) -> Result<()> {
    debug!(chat_id = ?chat_id, keyboard = ?reply.keyboard, "Sending reply");

    let request = bot.send_message(chat_id, reply.text.clone());
    match reply_markup(&reply.keyboard) {
        Some(markup) => request.reply_markup(markup).await?,
        None => request.await?,
    };

    Ok(())
}

/// Telegram markup for a keyboard, `None` when the message has no keyboard
pub fn reply_markup(keyboard: &Keyboard) -> Option<ReplyMarkup> {
    match keyboard {
        Keyboard::None => None,
        Keyboard::Remove => Some(ReplyMarkup::KeyboardRemove(KeyboardRemove::new())),
        Keyboard::ActionChoices => Some(ReplyMarkup::InlineKeyboard(action_keyboard())),
        Keyboard::PurposeSuggestions(purposes) => Some(ReplyMarkup::Keyboard(purpose_keyboard(purposes))),
        Keyboard::HourChoices => Some(ReplyMarkup::InlineKeyboard(hour_keyboard())),
        Keyboard::MinuteChoices { step } => Some(ReplyMarkup::InlineKeyboard(minute_keyboard(*step))),
    }
}

pub fn action_keyboard() -> InlineKeyboardMarkup {
    let buttons = Action::ALL
        .iter()
        .map(|action| vec![InlineKeyboardButton::callback(action.label(), action.token())])
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(buttons)
}

/// One-time reply keyboard; typing a different purpose is still allowed
pub fn purpose_keyboard(purposes: &[String]) -> KeyboardMarkup {
    let rows = purposes
        .iter()
        .map(|purpose| vec![KeyboardButton::new(purpose.clone())])
        .collect::<Vec<_>>();
    KeyboardMarkup::new(rows).one_time_keyboard().resize_keyboard()
}

pub fn hour_keyboard() -> InlineKeyboardMarkup {
    let buttons = (0..24u8)
        .map(|hour| InlineKeyboardButton::callback(format!("{:02}", hour), format!("{}{}", HOUR_PREFIX, hour)))
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(buttons.chunks(BUTTONS_PER_ROW).map(|row| row.to_vec()))
}

pub fn minute_keyboard(step: u8) -> InlineKeyboardMarkup {
    let step = step.max(1) as usize;
    let buttons = (0..60u8)
        .step_by(step)
        .map(|minute| InlineKeyboardButton::callback(format!(":{:02}", minute), format!("{}{}", MINUTE_PREFIX, minute)))
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(buttons.chunks(BUTTONS_PER_ROW).map(|row| row.to_vec()))
}

/// Name recorded in the log for a Telegram user
pub fn user_display_name(user: &User) -> String {
    display_name(user.username.as_deref(), &user.first_name, user.last_name.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_action_keyboard_uses_tokens() {
        assert_eq!(callback_data(&action_keyboard()), vec!["open", "close", "open & close"]);
    }

    #[test]
    fn test_hour_keyboard_covers_day() {
        let markup = hour_keyboard();
        assert_eq!(markup.inline_keyboard.len(), 4);
        let data = callback_data(&markup);
        assert_eq!(data.len(), 24);
        assert_eq!(data.first().map(String::as_str), Some("hour_0"));
        assert_eq!(data.last().map(String::as_str), Some("hour_23"));
    }

    #[test]
    fn test_minute_keyboard_follows_step() {
        let data = callback_data(&minute_keyboard(15));
        assert_eq!(data, vec!["minute_0", "minute_15", "minute_30", "minute_45"]);
        assert_eq!(callback_data(&minute_keyboard(5)).len(), 12);
    }

    #[test]
    fn test_reply_markup_variants() {
        assert!(reply_markup(&Keyboard::None).is_none());
        assert!(matches!(reply_markup(&Keyboard::Remove), Some(ReplyMarkup::KeyboardRemove(_))));
        assert!(matches!(
            reply_markup(&Keyboard::PurposeSuggestions(vec!["Weekly sessions".to_string()])),
            Some(ReplyMarkup::Keyboard(_))
        ));
    }
}
