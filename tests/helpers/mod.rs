//! Test helpers module
//!
//! Mock servers for the Telegram Bot API and the Google Sheets API, plus
//! builders for Telegram updates and test settings.

#![allow(dead_code)]

pub mod telegram_mock;
pub mod sheets_mock;
pub mod test_data;

pub use telegram_mock::*;
pub use sheets_mock::*;
pub use test_data::*;
