use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use nailbook_core::{
    compute_available_slots,
    errors::BookingError,
    models::settings::WorkingHoursResponse,
    time::format_time,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Either `service_id` or an explicit `duration` (minutes) must be given.
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
    pub service_id: Option<Uuid>,
    pub duration: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub working_hours: WorkingHoursResponse,
    pub slots: Vec<String>,
}

#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let duration = match (query.service_id, query.duration) {
        (Some(id), _) => {
            state
                .store
                .get_service(id)
                .await?
                .ok_or_else(|| BookingError::NotFound(format!("Service with ID {} not found", id)))?
                .duration_minutes
        }
        (None, Some(duration)) => duration,
        (None, None) => {
            return Err(AppError(BookingError::Validation(
                "Either service_id or duration is required".to_string(),
            )))
        }
    };

    let hours = state.store.working_hours().await?;
    let busy = state.store.busy_intervals(query.date).await?;
    let slots = compute_available_slots(query.date, duration, &hours, &busy, state.slot_step_minutes)?;

    Ok(Json(SlotsResponse {
        date: query.date,
        duration_minutes: duration,
        working_hours: hours.into(),
        slots: slots.into_iter().map(format_time).collect(),
    }))
}
