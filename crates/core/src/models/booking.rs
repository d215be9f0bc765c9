use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::{format_time, hhmm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Active,
    Done,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Active => "active",
            BookingStatus::Done => "done",
            BookingStatus::Canceled => "canceled",
        }
    }

    /// Whether a booking in this status still occupies its time.
    pub fn blocks_time(&self) -> bool {
        !matches!(self, BookingStatus::Canceled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(BookingStatus::Active),
            "done" => Ok(BookingStatus::Done),
            "canceled" => Ok(BookingStatus::Canceled),
            other => Err(format!("Unknown booking status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: u64,
    pub username: String,
    pub service_id: Option<Uuid>,
    pub service_name: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn summary(&self) -> String {
        format!(
            "{} {} | {} ({} min) | status: {}",
            self.date,
            format_time(self.start_time),
            self.service_name,
            self.duration_minutes,
            self.status
        )
    }
}

/// A booking about to be committed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub user_id: u64,
    pub username: String,
    pub service_id: Uuid,
    pub service_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
}

/// Time occupied by an existing booking on some day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    pub duration_minutes: u32,
}

impl BusyInterval {
    pub fn new(start: NaiveTime, duration_minutes: u32) -> Self {
        Self {
            start,
            duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub user_id: u64,
    pub username: String,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}
