use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use nailbook_core::{
    errors::BookingError,
    models::booking::{Booking, CreateBookingRequest, NewBooking, UpdateBookingStatusRequest},
    slots::check_booking_date,
    time::{parse_time_of_day, salon_today},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth::AdminToken, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError(BookingError::Validation(
            "Username cannot be empty".to_string(),
        )));
    }
    check_booking_date(payload.date, salon_today())?;
    let start_time = parse_time_of_day(&payload.time)?;

    let service = state
        .store
        .get_service(payload.service_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Service with ID {} not found", payload.service_id))
        })?;

    let booking = state
        .store
        .create_booking(NewBooking {
            user_id: payload.user_id,
            username: payload.username,
            service_id: service.id,
            service_name: service.name,
            date: payload.date,
            start_time,
            duration_minutes: service.duration_minutes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    _admin: AdminToken,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state.store.all_bookings().await?;
    Ok(Json(bookings))
}

#[axum::debug_handler]
pub async fn update_booking_status(
    State(state): State<Arc<ApiState>>,
    _admin: AdminToken,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = state.store.update_booking_status(id, payload.status).await?;
    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<ApiState>>,
    _admin: AdminToken,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete_booking(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
