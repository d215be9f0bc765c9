//! Bookable start times for one day.
//!
//! Candidates are laid on a fixed grid starting at opening time. A candidate is
//! kept when the whole service fits before closing time and its half-open
//! interval `[start, start + duration)` does not overlap any existing booking.
//! Bookings that merely touch (one ends exactly when the other starts) do not
//! overlap.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::SlotError;
use crate::models::booking::BusyInterval;
use crate::models::settings::WorkingHours;
use crate::session::Action;
use crate::time::format_time;

pub const DEFAULT_STEP_MINUTES: i64 = 30;

/// Largest step that can still produce a second candidate within one day.
pub const MAX_STEP_MINUTES: i64 = 24 * 60;

/// A slot as offered to the client: display label plus the token that
/// selects it in the confirmation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOption {
    pub label: String,
    pub token: String,
}

impl SlotOption {
    pub fn new(time: NaiveTime) -> Self {
        Self {
            label: format_time(time),
            token: Action::PickTime(time).to_string(),
        }
    }
}

/// Bookings open the day after `today`.
pub fn check_booking_date(date: NaiveDate, today: NaiveDate) -> Result<(), SlotError> {
    if date > today {
        Ok(())
    } else {
        Err(SlotError::DateNotBookable { date, today })
    }
}

/// Compute every valid start time for `duration` minutes on `date`.
///
/// `busy` does not need to be sorted and may contain overlapping entries.
/// An empty result is not an error.
pub fn compute_available_slots(
    date: NaiveDate,
    duration: i64,
    working_hours: &WorkingHours,
    busy: &[BusyInterval],
    step_minutes: i64,
) -> Result<Vec<NaiveTime>, SlotError> {
    let (day_start, day_end) = validate(date, duration, working_hours, step_minutes)?;
    if duration > working_hours.length_minutes() {
        return Ok(Vec::new());
    }
    let occupied = occupied_intervals(date, busy);
    let length = Duration::minutes(duration);
    // Any step of a day or more yields the opening time alone.
    let step = Duration::minutes(step_minutes.min(MAX_STEP_MINUTES));

    let mut slots = Vec::new();
    let mut candidate = day_start;
    while candidate + length <= day_end {
        if is_free(candidate, candidate + length, &occupied) {
            slots.push(candidate.time());
        }
        match candidate.checked_add_signed(step) {
            Some(next) => candidate = next,
            None => break,
        }
    }

    Ok(slots)
}

/// Same as [`compute_available_slots`], with each time paired with its token.
pub fn slot_options(
    date: NaiveDate,
    duration: i64,
    working_hours: &WorkingHours,
    busy: &[BusyInterval],
    step_minutes: i64,
) -> Result<Vec<SlotOption>, SlotError> {
    Ok(
        compute_available_slots(date, duration, working_hours, busy, step_minutes)?
            .into_iter()
            .map(SlotOption::new)
            .collect(),
    )
}

/// Check a single proposed start time against working hours and bookings.
///
/// Unlike [`compute_available_slots`] the start does not have to lie on the
/// grid. Used when committing a booking to re-validate the chosen slot.
pub fn is_slot_available(
    date: NaiveDate,
    start: NaiveTime,
    duration: i64,
    working_hours: &WorkingHours,
    busy: &[BusyInterval],
) -> Result<bool, SlotError> {
    let (day_start, day_end) = validate(date, duration, working_hours, 1)?;
    if duration > working_hours.length_minutes() {
        return Ok(false);
    }
    let start = date.and_time(start);
    let end = start + Duration::minutes(duration);
    if start < day_start || end > day_end {
        return Ok(false);
    }
    Ok(is_free(start, end, &occupied_intervals(date, busy)))
}

fn validate(
    date: NaiveDate,
    duration: i64,
    working_hours: &WorkingHours,
    step_minutes: i64,
) -> Result<(NaiveDateTime, NaiveDateTime), SlotError> {
    if duration <= 0 {
        return Err(SlotError::InvalidDuration(duration));
    }
    if working_hours.end <= working_hours.start {
        return Err(SlotError::InvalidWorkingHours {
            start: working_hours.start,
            end: working_hours.end,
        });
    }
    if step_minutes <= 0 {
        return Err(SlotError::InvalidStep(step_minutes));
    }
    Ok((date.and_time(working_hours.start), date.and_time(working_hours.end)))
}

fn occupied_intervals(date: NaiveDate, busy: &[BusyInterval]) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    busy.iter()
        .map(|interval| {
            let start = date.and_time(interval.start);
            let end = start
                .checked_add_signed(Duration::minutes(i64::from(interval.duration_minutes)))
                .unwrap_or(NaiveDateTime::MAX);
            (start, end)
        })
        .collect()
}

fn is_free(
    start: NaiveDateTime,
    end: NaiveDateTime,
    occupied: &[(NaiveDateTime, NaiveDateTime)],
) -> bool {
    occupied
        .iter()
        .all(|&(busy_start, busy_end)| end <= busy_start || start >= busy_end)
}
