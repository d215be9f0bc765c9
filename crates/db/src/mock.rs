use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use nailbook_core::{
    errors::BookingResult,
    models::{
        booking::{Booking, BookingStatus, BusyInterval, NewBooking},
        service::{CreateServiceRequest, Service},
        settings::WorkingHours,
    },
    store::BookingStore,
};
use uuid::Uuid;

// Mock store for API and bot tests
mock! {
    pub BookingStore {}

    #[async_trait]
    impl BookingStore for BookingStore {
        async fn list_services(&self) -> BookingResult<Vec<Service>>;

        async fn get_service(&self, id: Uuid) -> BookingResult<Option<Service>>;

        async fn create_service(&self, request: CreateServiceRequest) -> BookingResult<Service>;

        async fn create_booking(&self, booking: NewBooking) -> BookingResult<Booking>;

        async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>>;

        async fn user_bookings(&self, user_id: u64, from: NaiveDate) -> BookingResult<Vec<Booking>>;

        async fn all_bookings(&self) -> BookingResult<Vec<Booking>>;

        async fn busy_intervals(&self, date: NaiveDate) -> BookingResult<Vec<BusyInterval>>;

        async fn delete_booking(&self, id: Uuid) -> BookingResult<()>;

        async fn update_booking_status(
            &self,
            id: Uuid,
            status: BookingStatus,
        ) -> BookingResult<Booking>;

        async fn working_hours(&self) -> BookingResult<WorkingHours>;

        async fn set_working_hours(&self, hours: WorkingHours) -> BookingResult<()>;
    }
}
