//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{body_partial_json, method, path_regex},
    Mock, MockServer, ResponseTemplate,
};
use super::test_data::{TEST_BOT_TOKEN, TEST_CHANNEL_ID};

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub message_id: i32,
    pub delay_ms: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            message_id: 123,
            delay_ms: None,
        }
    }
}

impl MockResponseConfig {
    pub fn failing() -> Self {
        Self {
            success: false,
            ..Self::default()
        }
    }
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Bot whose requests go to this server
    pub fn bot(&self) -> Bot {
        let url = url::Url::parse(&self.server.uri()).expect("mock server uri is a valid url");
        Bot::new(TEST_BOT_TOKEN).set_api_url(url)
    }

    /// Path matcher for a Bot API method; Telegram method names are
    /// case-insensitive and teloxide sends them capitalized
    fn endpoint(method_name: &str) -> String {
        format!(
            "(?i)^/bot{}/{}$",
            regex_escape(TEST_BOT_TOKEN),
            regex_escape(method_name)
        )
    }

    fn message_response(config: &MockResponseConfig, chat_id: i64) -> ResponseTemplate {
        let body = if config.success {
            json!({
                "ok": true,
                "result": {
                    "message_id": config.message_id,
                    "from": {
                        "id": 12345,
                        "is_bot": true,
                        "first_name": "TestBot",
                        "username": "test_bot"
                    },
                    "chat": {
                        "id": chat_id,
                        "title": "Test Group",
                        "type": "supergroup"
                    },
                    "date": 1640995200,
                    "text": "Test message"
                }
            })
        } else {
            json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })
        };

        let mut response = ResponseTemplate::new(if config.success { 200 } else { 400 }).set_body_json(body);
        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }
        response
    }

    /// Setup mock for sendMessage to any chat
    pub async fn mock_send_message(&self, config: MockResponseConfig) {
        Mock::given(method("POST"))
            .and(path_regex(Self::endpoint("sendMessage")))
            .respond_with(Self::message_response(&config, 987654321))
            .with_priority(5)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for sendMessage to the log channel only; takes precedence
    /// over [`Self::mock_send_message`]
    pub async fn mock_channel_post(&self, config: MockResponseConfig) {
        Mock::given(method("POST"))
            .and(path_regex(Self::endpoint("sendMessage")))
            .and(body_partial_json(json!({ "chat_id": TEST_CHANNEL_ID })))
            .respond_with(Self::message_response(&config, TEST_CHANNEL_ID))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for answerCallbackQuery endpoint
    pub async fn mock_answer_callback_query(&self, config: MockResponseConfig) {
        let body = if config.success {
            json!({ "ok": true, "result": true })
        } else {
            json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: query is too old"
            })
        };

        Mock::given(method("POST"))
            .and(path_regex(Self::endpoint("answerCallbackQuery")))
            .respond_with(ResponseTemplate::new(if config.success { 200 } else { 400 }).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Setup all common mocks with default success responses
    pub async fn setup_default_mocks(&self) {
        let config = MockResponseConfig::default();

        self.mock_channel_post(config.clone()).await;
        self.mock_send_message(config.clone()).await;
        self.mock_answer_callback_query(config).await;
    }

    /// Bodies of every sendMessage request, in arrival order
    pub async fn sent_messages(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path().to_lowercase().ends_with("/sendmessage"))
            .filter_map(|req| serde_json::from_slice(&req.body).ok())
            .collect()
    }

    /// sendMessage bodies addressed to one chat
    pub async fn messages_to(&self, chat_id: i64) -> Vec<Value> {
        self.sent_messages()
            .await
            .into_iter()
            .filter(|body| body["chat_id"] == json!(chat_id))
            .collect()
    }

    /// Text of the last message sent to a chat
    pub async fn last_text_to(&self, chat_id: i64) -> Option<String> {
        self.messages_to(chat_id)
            .await
            .last()
            .and_then(|body| body["text"].as_str().map(str::to_string))
    }

    /// Verify that a specific endpoint was called
    pub async fn verify_endpoint_called(&self, endpoint: &str, times: usize) {
        let received_requests = self.server.received_requests().await.unwrap_or_default();
        let matching_requests = received_requests
            .iter()
            .filter(|req| req.url.path().to_lowercase().ends_with(&endpoint.to_lowercase()))
            .count();

        assert_eq!(
            matching_requests, times,
            "Expected {} calls to {}, but got {}",
            times, endpoint, matching_requests
        );
    }
}

/// Escape regex metacharacters in a literal path segment
fn regex_escape(literal: &str) -> String {
    literal
        .chars()
        .flat_map(|c| {
            let escape = r"\.+*?()|[]{}^$".contains(c);
            escape.then_some('\\').into_iter().chain(std::iter::once(c))
        })
        .collect()
}
