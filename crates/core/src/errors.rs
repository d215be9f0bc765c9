use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Failures of the slot calculator and of time-of-day parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid duration: {0} minutes (must be positive)")]
    InvalidDuration(i64),

    #[error(
        "Invalid working hours: {}-{} (end must be after start)",
        .start.format("%H:%M"),
        .end.format("%H:%M")
    )]
    InvalidWorkingHours { start: NaiveTime, end: NaiveTime },

    #[error("Invalid time format: {0:?} (expected HH:MM)")]
    InvalidTimeFormat(String),

    #[error("Invalid slot step: {0} minutes (must be positive)")]
    InvalidStep(i64),

    #[error("Cannot book {date}: bookings open the day after {today}")]
    DateNotBookable { date: NaiveDate, today: NaiveDate },
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error("Slot {} {} is no longer available", .date, .time.format("%H:%M"))]
    SlotUnavailable { date: NaiveDate, time: NaiveTime },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;
