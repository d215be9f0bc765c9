use crate::models::{DbBooking, DbBusyInterval};
use chrono::{NaiveDate, Utc};
use eyre::{eyre, Result};
use nailbook_core::models::booking::{BookingStatus, NewBooking};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

const BOOKING_COLUMNS: &str = "id, user_id, username, service_id, service_name, booking_date, \
                               start_time, duration_minutes, status, created_at";

/// Serialize writers for one booking date until the surrounding transaction ends.
pub async fn lock_booking_date(conn: &mut PgConnection, date: NaiveDate) -> Result<()> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(date.to_string())
        .execute(conn)
        .await?;

    Ok(())
}

pub async fn insert_booking(conn: &mut PgConnection, booking: &NewBooking) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let user_id = i64::try_from(booking.user_id)
        .map_err(|_| eyre!("User id {} does not fit the bookings table", booking.user_id))?;
    let duration = i32::try_from(booking.duration_minutes)
        .map_err(|_| eyre!("Duration {} is out of range", booking.duration_minutes))?;

    let query = format!(
        r#"
        INSERT INTO bookings (id, user_id, username, service_id, service_name,
                              booking_date, start_time, duration_minutes, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {BOOKING_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, DbBooking>(&query)
        .bind(id)
        .bind(user_id)
        .bind(&booking.username)
        .bind(booking.service_id)
        .bind(&booking.service_name)
        .bind(booking.date)
        .bind(booking.start_time)
        .bind(duration)
        .bind(BookingStatus::Active.as_str())
        .bind(now)
        .fetch_one(conn)
        .await?;

    Ok(row)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");
    let booking = sqlx::query_as::<_, DbBooking>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(booking)
}

pub async fn get_user_bookings(
    pool: &Pool<Postgres>,
    user_id: i64,
    from: NaiveDate,
) -> Result<Vec<DbBooking>> {
    let query = format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE user_id = $1 AND booking_date >= $2
        ORDER BY booking_date ASC, start_time ASC
        "#
    );
    let bookings = sqlx::query_as::<_, DbBooking>(&query)
        .bind(user_id)
        .bind(from)
        .fetch_all(pool)
        .await?;

    Ok(bookings)
}

pub async fn get_all_bookings(pool: &Pool<Postgres>) -> Result<Vec<DbBooking>> {
    let query = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY booking_date ASC, start_time ASC"
    );
    let bookings = sqlx::query_as::<_, DbBooking>(&query)
        .fetch_all(pool)
        .await?;

    Ok(bookings)
}

/// Start time and duration of every booking on `date` that still occupies time.
pub async fn get_busy_intervals<'e, E>(executor: E, date: NaiveDate) -> Result<Vec<DbBusyInterval>>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let intervals = sqlx::query_as::<_, DbBusyInterval>(
        r#"
        SELECT start_time, duration_minutes
        FROM bookings
        WHERE booking_date = $1 AND status <> $2
        "#,
    )
    .bind(date)
    .bind(BookingStatus::Canceled.as_str())
    .fetch_all(executor)
    .await?;

    Ok(intervals)
}

/// Returns `false` when no booking had that id.
pub async fn delete_booking(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn update_booking_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: BookingStatus,
) -> Result<Option<DbBooking>> {
    let query = format!(
        r#"
        UPDATE bookings
        SET status = $2
        WHERE id = $1
        RETURNING {BOOKING_COLUMNS}
        "#
    );
    let booking = sqlx::query_as::<_, DbBooking>(&query)
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(booking)
}
