//! Test data helpers for creating test objects
//!
//! Telegram messages, callback queries and users, plus bot settings that
//! point at the mock servers.

use teloxide::types::{
    Message, User, Chat, ChatKind, MessageKind, MessageCommon, CallbackQuery,
    UserId, ChatId, MessageId, ChatPrivate, ChatPublic, PublicChatKind,
    PublicChatSupergroup, MediaKind, MediaText
};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use ShedLog::config::Settings;

pub const TEST_BOT_TOKEN: &str = "12345:test_token";
pub const TEST_CHANNEL_ID: i64 = -1001234567890;
pub const TEST_SPREADSHEET_ID: &str = "test-spreadsheet";
pub const TEST_WORKSHEET: &str = "ShedLog";

/// Settings wired to a Telegram mock and a Sheets mock, using a static token
pub fn create_test_settings(telegram_url: &str, sheets_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.bot.token = TEST_BOT_TOKEN.to_string();
    settings.bot.api_url = Some(telegram_url.to_string());
    settings.channel.chat_id = TEST_CHANNEL_ID.to_string();
    settings.sheets.spreadsheet_id = TEST_SPREADSHEET_ID.to_string();
    settings.sheets.worksheet_name = TEST_WORKSHEET.to_string();
    settings.sheets.api_base_url = sheets_url.to_string();
    settings.sheets.token_url = format!("{}/token", sheets_url);
    settings.sheets.access_token = Some("ya29.static-test-token".to_string());
    settings.sheets.timeout_seconds = 5;
    settings
}

/// 2026-10-16 18:41:07 at UTC+8
pub fn fixed_now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(8 * 3600)
        .and_then(|tz| tz.with_ymd_and_hms(2026, 10, 16, 18, 41, 7).single())
        .expect("valid fixed timestamp")
}

/// Helper function to create a test Telegram user
pub fn create_test_user(
    user_id: i64,
    username: Option<&str>,
    first_name: &str,
    last_name: Option<&str>,
    language_code: Option<&str>,
) -> User {
    User {
        id: UserId(user_id as u64),
        is_bot: false,
        first_name: first_name.to_string(),
        last_name: last_name.map(|s| s.to_string()),
        username: username.map(|s| s.to_string()),
        language_code: language_code.map(|s| s.to_string()),
        is_premium: false,
        added_to_attachment_menu: false,
    }
}

/// Helper function to create a test private chat
pub fn create_test_private_chat(
    chat_id: i64,
    username: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Chat {
    Chat {
        id: ChatId(chat_id),
        kind: ChatKind::Private(ChatPrivate {
            username: username.map(|s| s.to_string()),
            first_name: first_name.map(|s| s.to_string()),
            last_name: last_name.map(|s| s.to_string()),
        }),
    }
}

/// Helper function to create a test group chat
pub fn create_test_group_chat(chat_id: i64, title: &str) -> Chat {
    Chat {
        id: ChatId(chat_id),
        kind: ChatKind::Public(ChatPublic {
            title: Some(title.to_string()),
            kind: PublicChatKind::Supergroup(PublicChatSupergroup {
                username: None,
                is_forum: false,
            }),
        }),
    }
}

/// Helper function to create a test Telegram message
pub fn create_test_message(
    user_id: i64,
    chat_id: i64,
    text: &str,
    username: Option<&str>,
    first_name: &str,
    last_name: Option<&str>,
) -> Message {
    let user = create_test_user(user_id, username, first_name, last_name, Some("en"));
    
    let chat = if chat_id > 0 {
        create_test_private_chat(chat_id, username, Some(first_name), last_name)
    } else {
        create_test_group_chat(chat_id, "Test Group")
    };

    Message {
        id: MessageId(1),
        thread_id: None,
        from: Some(user),
        sender_chat: None,
        sender_business_bot: None,
        date: Utc::now(),
        chat,
        is_topic_message: false,
        via_bot: None,
        kind: MessageKind::Common(MessageCommon {
            author_signature: None,
            forward_origin: None,
            external_reply: None,
            quote: None,
            reply_to_story: None,
            edit_date: None,
            media_kind: MediaKind::Text(MediaText {
                text: text.to_string(),
                entities: vec![],
                link_preview_options: None,
            }),
            reply_markup: None,
            effect_id: None,
            reply_to_message: None,
            sender_boost_count: None,
            is_automatic_forward: false,
            has_protected_content: false,
            is_from_offline: false,
            business_connection_id: None,
        }),
    }
}

/// Helper function to create a simple test message with default user data
pub fn create_simple_test_message(user_id: i64, chat_id: i64, text: &str) -> Message {
    create_test_message(
        user_id,
        chat_id,
        text,
        Some("testuser"),
        "TestUser",
        Some("LastName"),
    )
}

/// Helper function to create a test callback query
pub fn create_test_callback_query(
    user_id: i64,
    chat_id: i64,
    data: &str,
    username: Option<&str>,
    first_name: &str,
    last_name: Option<&str>,
) -> CallbackQuery {
    let user = create_test_user(user_id, username, first_name, last_name, Some("en"));
    let message = create_test_message(user_id, chat_id, "Test message", username, first_name, last_name);
    
    CallbackQuery {
        id: format!("callback_{}", user_id),
        from: user,
        message: Some(teloxide::types::MaybeInaccessibleMessage::Regular(Box::new(message))),
        inline_message_id: None,
        data: Some(data.to_string()),
        game_short_name: None,
        chat_instance: "test_chat_instance".to_string(),
    }
}

/// Helper function to create a simple test callback query with default user data
pub fn create_simple_test_callback_query(user_id: i64, chat_id: i64, data: &str) -> CallbackQuery {
    create_test_callback_query(
        user_id,
        chat_id,
        data,
        Some("testuser"),
        "TestUser",
        Some("LastName"),
    )
}
