use axum::{extract::State, http::StatusCode, Json};
use nailbook_core::{
    errors::BookingError,
    models::service::{CreateServiceRequest, Service},
};
use std::sync::Arc;

use crate::{
    middleware::{auth::AdminToken, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = state.store.list_services().await?;
    Ok(Json(services))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    _admin: AdminToken,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    payload.validate().map_err(BookingError::Validation)?;

    let service = state.store.create_service(payload).await?;
    Ok((StatusCode::CREATED, Json(service)))
}
