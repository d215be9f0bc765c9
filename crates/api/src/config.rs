//! # API Configuration Module
//!
//! Loads the HTTP server configuration from environment variables, with
//! defaults where a sensible one exists.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `ADMIN_TOKEN_HASH`: Argon2 hash of the bearer token guarding admin routes
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `SLOT_STEP_MINUTES`: Grid step for offered start times (default: 30)

use eyre::{eyre, Result, WrapErr};
use nailbook_core::{DEFAULT_STEP_MINUTES, MAX_STEP_MINUTES};
use std::env;
use tracing::Level;

/// Configuration for the booking API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use nailbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Argon2 hash of the admin bearer token. Admin routes answer 403 when unset.
    pub admin_token_hash: Option<String>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    pub slot_step_minutes: i64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// - `DATABASE_URL` is not set
    /// - `API_PORT` cannot be parsed as a u16
    /// - `API_REQUEST_TIMEOUT_SECONDS` is not a number
    /// - `SLOT_STEP_MINUTES` is not between 1 and 1440
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`], reading values through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS")
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        // Security settings
        let admin_token_hash = lookup("ADMIN_TOKEN_HASH").filter(|hash| !hash.trim().is_empty());

        // Performance settings
        let request_timeout = match lookup("API_REQUEST_TIMEOUT_SECONDS") {
            Some(value) => value
                .parse()
                .wrap_err("Invalid API_REQUEST_TIMEOUT_SECONDS value")?,
            None => 30,
        };

        // Booking settings
        let slot_step_minutes = match lookup("SLOT_STEP_MINUTES") {
            Some(value) => value.parse().wrap_err("Invalid SLOT_STEP_MINUTES value")?,
            None => DEFAULT_STEP_MINUTES,
        };
        if !(1..=MAX_STEP_MINUTES).contains(&slot_step_minutes) {
            return Err(eyre!(
                "SLOT_STEP_MINUTES must be between 1 and {}, got {}",
                MAX_STEP_MINUTES,
                slot_step_minutes
            ));
        }

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            admin_token_hash,
            request_timeout,
            slot_step_minutes,
        })
    }

    /// Returns the server address (e.g. "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
