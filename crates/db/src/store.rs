use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{eyre, WrapErr};
use nailbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        booking::{Booking, BookingStatus, BusyInterval, NewBooking},
        service::{CreateServiceRequest, Service},
        settings::WorkingHours,
    },
    slots::is_slot_available,
    store::BookingStore,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    repositories::{booking, service, settings},
    DbPool,
};

/// [`BookingStore`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn into_bookings(rows: Vec<crate::models::DbBooking>) -> BookingResult<Vec<Booking>> {
    rows.into_iter()
        .map(|row| Booking::try_from(row).map_err(BookingError::Database))
        .collect()
}

#[async_trait]
impl BookingStore for PgStore {
    async fn list_services(&self) -> BookingResult<Vec<Service>> {
        let rows = service::list_services(&self.pool).await?;
        Ok(rows.into_iter().map(Service::from).collect())
    }

    async fn get_service(&self, id: Uuid) -> BookingResult<Option<Service>> {
        let row = service::get_service_by_id(&self.pool, id).await?;
        Ok(row.map(Service::from))
    }

    async fn create_service(&self, request: CreateServiceRequest) -> BookingResult<Service> {
        request.validate().map_err(BookingError::Validation)?;
        let duration = i32::try_from(request.duration_minutes).map_err(|_| {
            BookingError::Validation(format!(
                "Service duration {} is too large",
                request.duration_minutes
            ))
        })?;

        let row = service::create_service(
            &self.pool,
            request.name.trim(),
            request.price.trim(),
            duration,
        )
        .await?;
        info!("Service '{}' added ({} min)", row.name, row.duration_minutes);

        Ok(row.into())
    }

    async fn create_booking(&self, new_booking: NewBooking) -> BookingResult<Booking> {
        let hours = self.working_hours().await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .wrap_err("Failed to start booking transaction")?;

        booking::lock_booking_date(&mut tx, new_booking.date).await?;

        let busy: Vec<BusyInterval> = booking::get_busy_intervals(&mut *tx, new_booking.date)
            .await?
            .into_iter()
            .map(BusyInterval::from)
            .collect();

        let available = is_slot_available(
            new_booking.date,
            new_booking.start_time,
            new_booking.duration_minutes,
            &hours,
            &busy,
        )?;
        if !available {
            warn!(
                "Rejected booking for user {} at {} {}: slot taken",
                new_booking.user_id, new_booking.date, new_booking.start_time
            );
            return Err(BookingError::SlotUnavailable {
                date: new_booking.date,
                time: new_booking.start_time,
            });
        }

        let row = booking::insert_booking(&mut tx, &new_booking).await?;
        tx.commit()
            .await
            .wrap_err("Failed to commit booking transaction")?;

        info!(
            "Booking {} created: user={} service='{}' at {} {}",
            row.id, row.user_id, row.service_name, row.booking_date, row.start_time
        );
        Ok(Booking::try_from(row)?)
    }

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        booking::get_booking_by_id(&self.pool, id)
            .await?
            .map(Booking::try_from)
            .transpose()
            .map_err(BookingError::Database)
    }

    async fn user_bookings(&self, user_id: u64, from: NaiveDate) -> BookingResult<Vec<Booking>> {
        let user_id = i64::try_from(user_id)
            .map_err(|_| BookingError::Validation(format!("Invalid user id {user_id}")))?;
        into_bookings(booking::get_user_bookings(&self.pool, user_id, from).await?)
    }

    async fn all_bookings(&self) -> BookingResult<Vec<Booking>> {
        into_bookings(booking::get_all_bookings(&self.pool).await?)
    }

    async fn busy_intervals(&self, date: NaiveDate) -> BookingResult<Vec<BusyInterval>> {
        let rows = booking::get_busy_intervals(&self.pool, date).await?;
        Ok(rows.into_iter().map(BusyInterval::from).collect())
    }

    async fn delete_booking(&self, id: Uuid) -> BookingResult<()> {
        if !booking::delete_booking(&self.pool, id).await? {
            return Err(BookingError::NotFound(format!("Booking {id} not found")));
        }
        info!("Booking {} deleted", id);
        Ok(())
    }

    async fn update_booking_status(&self, id: Uuid, status: BookingStatus) -> BookingResult<Booking> {
        let row = booking::update_booking_status(&self.pool, id, status)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Booking {id} not found")))?;
        info!("Booking {} marked as {}", id, status);
        Ok(Booking::try_from(row)?)
    }

    async fn working_hours(&self) -> BookingResult<WorkingHours> {
        match settings::get_setting(&self.pool, settings::WORK_HOURS_KEY).await? {
            Some(raw) => Ok(WorkingHours::parse(&raw).map_err(|e| {
                warn!("Stored working hours {:?} are malformed: {}", raw, e);
                e
            })?),
            None => Ok(WorkingHours::default()),
        }
    }

    async fn set_working_hours(&self, hours: WorkingHours) -> BookingResult<()> {
        if hours.end <= hours.start {
            return Err(eyre!("Refusing to store inverted working hours {}", hours).into());
        }
        settings::set_setting(&self.pool, settings::WORK_HOURS_KEY, &hours.to_string()).await?;
        info!("Working hours set to {}", hours);
        Ok(())
    }
}
