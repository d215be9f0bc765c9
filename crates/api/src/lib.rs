//! # Nailbook API
//!
//! JSON HTTP surface over the salon booking store: the service catalog,
//! free-slot lookup, booking creation and the operator's booking and
//! working-hours management.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Turn requests into store calls
//! - **Middleware**: Admin token checks and error-to-status mapping
//! - **Config**: Environment configuration
//!
//! Handlers only see `dyn BookingStore`, so tests run the full router
//! against a mock store.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Admin authentication and error handling
pub mod middleware;
/// Route definitions
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::{Result, WrapErr};
use nailbook_core::store::BookingStore;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub store: Arc<dyn BookingStore>,
    /// Argon2 hash of the operator token; `None` disables admin routes.
    pub admin_token_hash: Option<String>,
    pub slot_step_minutes: i64,
}

/// Builds the application router with all routes attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Service catalog
        .merge(routes::services::routes())
        // Free slot lookup
        .merge(routes::slots::routes())
        // Booking creation and management
        .merge(routes::bookings::routes())
        // Working hours
        .merge(routes::settings::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and store
///
/// Installs the tracing subscriber at the configured level, wraps the router
/// in CORS and timeout layers and serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn BookingStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if config.admin_token_hash.is_none() {
        info!("ADMIN_TOKEN_HASH not set, admin endpoints are disabled");
    }

    let state = Arc::new(ApiState {
        store,
        admin_token_hash: config.admin_token_hash.clone(),
        slot_step_minutes: config.slot_step_minutes,
    });

    let app = build_router(state).layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin {:?}", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
