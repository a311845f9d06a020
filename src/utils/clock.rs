//! Wall-clock source used when a log entry is stamped

use chrono::{DateTime, FixedOffset};
use super::helpers::now_in_offset;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System clock rendered in a fixed offset
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        now_in_offset(self.offset)
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
