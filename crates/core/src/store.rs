//! Persistence seam between the domain and the storage backend.
//!
//! The PostgreSQL implementation lives in `nailbook-db`; the conversation
//! layer and the HTTP API only ever talk to `dyn BookingStore`.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::booking::{Booking, BookingStatus, BusyInterval, NewBooking};
use crate::models::service::{CreateServiceRequest, Service};
use crate::models::settings::WorkingHours;

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn list_services(&self) -> BookingResult<Vec<Service>>;

    async fn get_service(&self, id: Uuid) -> BookingResult<Option<Service>>;

    async fn create_service(&self, request: CreateServiceRequest) -> BookingResult<Service>;

    /// Commit a booking. Implementations must re-check availability and
    /// serialize writers per date, failing with
    /// [`BookingError::SlotUnavailable`](crate::errors::BookingError::SlotUnavailable)
    /// when the slot was taken in the meantime.
    async fn create_booking(&self, booking: NewBooking) -> BookingResult<Booking>;

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>>;

    /// Bookings of one user dated `from` or later, soonest first.
    async fn user_bookings(&self, user_id: u64, from: NaiveDate) -> BookingResult<Vec<Booking>>;

    async fn all_bookings(&self) -> BookingResult<Vec<Booking>>;

    /// Intervals occupied on `date` by bookings that still block time.
    async fn busy_intervals(&self, date: NaiveDate) -> BookingResult<Vec<BusyInterval>>;

    async fn delete_booking(&self, id: Uuid) -> BookingResult<()>;

    async fn update_booking_status(&self, id: Uuid, status: BookingStatus) -> BookingResult<Booking>;

    /// Stored working hours, or the default when none were ever saved.
    async fn working_hours(&self) -> BookingResult<WorkingHours>;

    async fn set_working_hours(&self, hours: WorkingHours) -> BookingResult<()>;
}
