use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::{eyre, Result};
use nailbook_core::models::{
    booking::{Booking, BookingStatus, BusyInterval},
    service::Service,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub price: String,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: row.id,
            name: row.name,
            price: row.price,
            duration_minutes: i64::from(row.duration_minutes),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub user_id: i64,
    pub username: String,
    pub service_id: Option<Uuid>,
    pub service_name: String,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbBooking> for Booking {
    type Error = eyre::Report;

    fn try_from(row: DbBooking) -> Result<Self> {
        let status = row
            .status
            .parse::<BookingStatus>()
            .map_err(|e| eyre!("Booking {} has a corrupt status: {}", row.id, e))?;
        let user_id = u64::try_from(row.user_id)
            .map_err(|_| eyre!("Booking {} has a negative user id", row.id))?;

        Ok(Booking {
            id: row.id,
            user_id,
            username: row.username,
            service_id: row.service_id,
            service_name: row.service_name,
            date: row.booking_date,
            start_time: row.start_time,
            duration_minutes: i64::from(row.duration_minutes),
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBusyInterval {
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
}

impl From<DbBusyInterval> for BusyInterval {
    fn from(row: DbBusyInterval) -> Self {
        // CHECK constraint keeps this non-negative.
        BusyInterval::new(row.start_time, u32::try_from(row.duration_minutes).unwrap_or(0))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSetting {
    pub key: String,
    pub value: String,
}
