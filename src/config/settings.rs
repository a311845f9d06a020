//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub channel: ChannelConfig,
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub dialogue: DialogueConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// Override for the Bot API base URL (self-hosted API servers, tests)
    pub api_url: Option<String>,
}

/// Notification channel configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChannelConfig {
    /// Numeric chat id or `@channelusername`
    pub chat_id: String,
    /// Forum topic to post into
    pub thread_id: Option<i32>,
}

/// Google Sheets configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub worksheet_name: String,
    #[serde(default = "default_sheets_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    pub service_account_path: Option<String>,
    /// Service account key JSON, inline
    pub service_account_json: Option<String>,
    /// Pre-issued OAuth access token; skips the service account exchange
    pub access_token: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Dialogue flow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DialogueConfig {
    pub suggested_purposes: Vec<String>,
    pub minute_step: u8,
    /// Abandoned dialogues expire after this many seconds; unset keeps them forever
    pub ttl_seconds: Option<u64>,
    pub utc_offset_hours: i32,
    pub cleanup_interval_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file
    pub file_path: String,
}

fn default_sheets_api_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            suggested_purposes: vec!["Weekly sessions".to_string()],
            minute_step: 5,
            ttl_seconds: None,
            utc_offset_hours: 8,
            cleanup_interval_seconds: 300,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: "logs".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from configuration file and environment variables
    ///
    /// Environment keys use the `SHEDLOG` prefix and `__` between sections,
    /// e.g. `SHEDLOG_BOT__TOKEN` or `SHEDLOG_SHEETS__SPREADSHEET_ID`.
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("SHEDLOG")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("dialogue.suggested_purposes"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ShedLogError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                api_url: None,
            },
            channel: ChannelConfig {
                chat_id: String::new(),
                thread_id: None,
            },
            sheets: SheetsConfig {
                spreadsheet_id: String::new(),
                worksheet_name: String::new(),
                api_base_url: default_sheets_api_base_url(),
                token_url: default_token_url(),
                service_account_path: None,
                service_account_json: None,
                access_token: None,
                timeout_seconds: default_timeout_seconds(),
            },
            dialogue: DialogueConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
