use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::SlotError;
use crate::time::{format_time, parse_time_range};

/// Daily open/close boundary. `start < end` always holds for values built
/// through [`WorkingHours::new`] or [`WorkingHours::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkingHours {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, SlotError> {
        if end <= start {
            return Err(SlotError::InvalidWorkingHours { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse the stored/typed `HH:MM-HH:MM` form.
    pub fn parse(input: &str) -> Result<Self, SlotError> {
        let (start, end) = parse_time_range(input)?;
        Self::new(start, end)
    }

    pub fn length_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: NaiveTime::MIN + Duration::hours(10),
            end: NaiveTime::MIN + Duration::hours(21),
        }
    }
}

impl std::fmt::Display for WorkingHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", format_time(self.start), format_time(self.end))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingHoursResponse {
    pub start: String,
    pub end: String,
}

impl From<WorkingHours> for WorkingHoursResponse {
    fn from(hours: WorkingHours) -> Self {
        Self {
            start: format_time(hours.start),
            end: format_time(hours.end),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkingHoursRequest {
    pub start: String,
    pub end: String,
}
