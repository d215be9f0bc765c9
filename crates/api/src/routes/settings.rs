use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/settings/work-hours",
        get(handlers::settings::get_working_hours).put(handlers::settings::update_working_hours),
    )
}
