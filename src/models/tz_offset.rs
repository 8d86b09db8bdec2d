use chrono::TimeDelta;
use serde::Serialize;
use std::fmt;

pub const MIN_OFFSET_HOURS: i32 = -12;
pub const MAX_OFFSET_HOURS: i32 = 14;

/// Whole-hour offset from UTC, always within [-12, 14].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TzOffset(i32);

impl TzOffset {
    pub fn new(hours: i32) -> Option<Self> {
        if (MIN_OFFSET_HOURS..=MAX_OFFSET_HOURS).contains(&hours) {
            Some(TzOffset(hours))
        } else {
            None
        }
    }

    pub fn hours(&self) -> i32 {
        self.0
    }

    pub fn as_delta(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.0))
    }
}

impl fmt::Display for TzOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UTC{:+}", self.0)
    }
}
