//! `HH:MM` time-of-day handling.
//!
//! Everything that reaches the slot calculator goes through here first, so the
//! calculator itself only ever sees well-formed [`NaiveTime`] values.

use chrono::{Local, NaiveDate, NaiveTime};

use crate::errors::SlotError;

pub const TIME_FORMAT: &str = "%H:%M";

/// The salon's calendar date. Working hours and stored booking times are
/// wall-clock times of the host the services run on.
pub fn salon_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a strict `HH:MM` (or `H:MM`) string.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, SlotError> {
    let trimmed = input.trim();
    let (hours, minutes) = trimmed
        .split_once(':')
        .ok_or_else(|| SlotError::InvalidTimeFormat(input.to_string()))?;

    let valid_part = |part: &str, max_len: usize| {
        !part.is_empty() && part.len() <= max_len && part.bytes().all(|b| b.is_ascii_digit())
    };
    if !valid_part(hours, 2) || minutes.len() != 2 || !valid_part(minutes, 2) {
        return Err(SlotError::InvalidTimeFormat(input.to_string()));
    }

    let hours: u32 = hours
        .parse()
        .map_err(|_| SlotError::InvalidTimeFormat(input.to_string()))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| SlotError::InvalidTimeFormat(input.to_string()))?;

    NaiveTime::from_hms_opt(hours, minutes, 0)
        .ok_or_else(|| SlotError::InvalidTimeFormat(input.to_string()))
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parse an `HH:MM-HH:MM` range as typed by the operator.
///
/// Only the format is checked here; ordering is enforced by
/// [`WorkingHours::new`](crate::models::settings::WorkingHours::new).
pub fn parse_time_range(input: &str) -> Result<(NaiveTime, NaiveTime), SlotError> {
    let (start, end) = input
        .split_once('-')
        .ok_or_else(|| SlotError::InvalidTimeFormat(input.to_string()))?;
    Ok((parse_time_of_day(start)?, parse_time_of_day(end)?))
}

/// `#[serde(with = "crate::time::hhmm")]` for `NaiveTime` fields exchanged as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw).map_err(serde::de::Error::custom)
    }
}
