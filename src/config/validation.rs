//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{ShedLogError, Result};
use crate::utils::helpers::offset_from_hours;
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_channel_config(&settings.channel)?;
    validate_sheets_config(&settings.sheets)?;
    validate_dialogue_config(&settings.dialogue)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(ShedLogError::Config(
            "Bot token is required".to_string()
        ));
    }

    if let Some(api_url) = &config.api_url {
        url::Url::parse(api_url)?;
    }

    Ok(())
}

/// Validate notification channel configuration
fn validate_channel_config(config: &super::ChannelConfig) -> Result<()> {
    let chat_id = config.chat_id.trim();
    if chat_id.is_empty() {
        return Err(ShedLogError::Config(
            "Channel chat ID is required".to_string()
        ));
    }

    if !chat_id.starts_with('@') && chat_id.parse::<i64>().is_err() {
        return Err(ShedLogError::Config(
            format!("Channel chat ID must be numeric or an @username, got '{}'", chat_id)
        ));
    }

    Ok(())
}

/// Validate Google Sheets configuration
fn validate_sheets_config(config: &super::SheetsConfig) -> Result<()> {
    if config.spreadsheet_id.is_empty() {
        return Err(ShedLogError::Config(
            "Spreadsheet ID is required".to_string()
        ));
    }

    if config.worksheet_name.is_empty() {
        return Err(ShedLogError::Config(
            "Worksheet name is required".to_string()
        ));
    }

    url::Url::parse(&config.api_base_url)?;
    url::Url::parse(&config.token_url)?;

    let has_credentials = config.access_token.is_some()
        || config.service_account_json.is_some()
        || config.service_account_path.is_some();
    if !has_credentials {
        return Err(ShedLogError::Config(
            "One of sheets.access_token, sheets.service_account_json or sheets.service_account_path is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(ShedLogError::Config(
            "Sheets timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate dialogue configuration
fn validate_dialogue_config(config: &super::DialogueConfig) -> Result<()> {
    if config.minute_step == 0 || 60 % config.minute_step != 0 {
        return Err(ShedLogError::Config(
            format!("Minute step must divide 60, got {}", config.minute_step)
        ));
    }

    if offset_from_hours(config.utc_offset_hours).is_none() {
        return Err(ShedLogError::Config(
            format!("UTC offset out of range: {}", config.utc_offset_hours)
        ));
    }

    if config.ttl_seconds == Some(0) {
        return Err(ShedLogError::Config(
            "Dialogue TTL must be greater than 0 when set".to_string()
        ));
    }

    if config.cleanup_interval_seconds == 0 {
        return Err(ShedLogError::Config(
            "Cleanup interval must be greater than 0".to_string()
        ));
    }

    if config.suggested_purposes.iter().any(|p| p.trim().is_empty()) {
        return Err(ShedLogError::Config(
            "Suggested purposes must not be blank".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ShedLogError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ShedLogError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
