use axum::{extract::State, Json};
use nailbook_core::{
    models::settings::{UpdateWorkingHoursRequest, WorkingHours, WorkingHoursResponse},
    time::parse_time_of_day,
};
use std::sync::Arc;

use crate::{
    middleware::{auth::AdminToken, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn get_working_hours(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<WorkingHoursResponse>, AppError> {
    let hours = state.store.working_hours().await?;
    Ok(Json(hours.into()))
}

#[axum::debug_handler]
pub async fn update_working_hours(
    State(state): State<Arc<ApiState>>,
    _admin: AdminToken,
    Json(payload): Json<UpdateWorkingHoursRequest>,
) -> Result<Json<WorkingHoursResponse>, AppError> {
    let hours = WorkingHours::new(
        parse_time_of_day(&payload.start)?,
        parse_time_of_day(&payload.end)?,
    )?;

    state.store.set_working_hours(hours).await?;
    Ok(Json(hours.into()))
}
