//! Log entry model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike};
use super::dialogue::Action;

/// Written in place of the notification id when the channel post failed
pub const NOTIFICATION_ID_PLACEHOLDER: &str = "N/A";

/// Completed submission, built once when the last step is answered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub display_name: String,
    pub action: Action,
    pub purpose: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub submitted_at: DateTime<FixedOffset>,
}

impl LogEntry {
    /// Returns `None` when `hour`/`minute` do not form a valid time of day
    pub fn new(
        display_name: impl Into<String>,
        action: Action,
        purpose: impl Into<String>,
        hour: u8,
        minute: u8,
        submitted_at: DateTime<FixedOffset>,
    ) -> Option<Self> {
        let time = NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0)?;

        Some(Self {
            display_name: display_name.into(),
            action,
            purpose: purpose.into(),
            date: submitted_at.date_naive(),
            time,
            submitted_at,
        })
    }

    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Chosen time as `HH:MM`
    pub fn time_string(&self) -> String {
        format!("{:02}:{:02}", self.time.hour(), self.time.minute())
    }

    pub fn submitted_at_string(&self) -> String {
        self.submitted_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Sheet row: name, action, purpose, date, time, submitted at, notification id
    pub fn to_row(&self, notification_id: &str) -> Vec<String> {
        vec![
            self.display_name.clone(),
            self.action.label().to_string(),
            self.purpose.clone(),
            self.date_string(),
            self.time_string(),
            self.submitted_at_string(),
            notification_id.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submitted_at() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .and_then(|tz| tz.with_ymd_and_hms(2026, 10, 16, 9, 5, 42).single())
            .expect("valid timestamp")
    }

    #[test]
    fn test_row_layout() {
        let entry = LogEntry::new("shedkeeper", Action::Open, "Weekly sessions", 18, 30, submitted_at())
            .expect("valid entry");

        assert_eq!(
            entry.to_row("321"),
            vec![
                "shedkeeper",
                "Open",
                "Weekly sessions",
                "2026-10-16",
                "18:30",
                "2026-10-16 09:05:42",
                "321",
            ]
        );
    }

    #[test]
    fn test_time_is_zero_padded() {
        let entry = LogEntry::new("a", Action::Close, "b", 7, 5, submitted_at()).expect("valid entry");
        assert_eq!(entry.time_string(), "07:05");
    }

    #[test]
    fn test_out_of_range_time_rejected() {
        assert!(LogEntry::new("a", Action::Close, "b", 24, 0, submitted_at()).is_none());
        assert!(LogEntry::new("a", Action::Close, "b", 23, 60, submitted_at()).is_none());
    }
}
