use eyre::{eyre, Result, WrapErr};
use nailbook_core::{DEFAULT_STEP_MINUTES, MAX_STEP_MINUTES};
use serde::Deserialize;
use std::env;
use tracing::error;

pub const DEFAULT_BOOKING_DAYS_AHEAD: i64 = 7;
pub const MAX_BOOKING_DAYS_AHEAD: i64 = 365;

/// Configuration for the Discord bot.
///
/// Holds the Discord connection details, the database URL and the booking
/// knobs the conversation uses.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Discord bot token (required)
    pub token: String,
    /// Application ID for Discord bot (required)
    pub application_id: u64,
    /// Database connection URL (required)
    pub database_url: String,
    /// Discord user id of the salon operator. Admin features are off when unset.
    pub admin_id: Option<u64>,
    /// Grid step for offered start times
    pub slot_step_minutes: i64,
    /// How many days starting tomorrow the date picker offers
    pub booking_days_ahead: i64,
    /// Test guild ID for faster command registration during development
    pub test_guild_id: Option<u64>,
}

impl BotConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup("DISCORD_TOKEN")
            .ok_or_else(|| eyre!("DISCORD_TOKEN environment variable not set"))?;

        let application_id = lookup("DISCORD_APPLICATION_ID")
            .ok_or_else(|| eyre!("DISCORD_APPLICATION_ID environment variable not set"))?
            .parse::<u64>()
            .map_err(|_| eyre!("DISCORD_APPLICATION_ID must be a valid u64"))?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable not set"))?;

        let admin_id = match lookup("ADMIN_ID").map(|id| id.trim().parse::<u64>()) {
            Some(Ok(id)) => Some(id),
            Some(Err(_)) => {
                error!("ADMIN_ID is not a valid Discord user id, admin features are disabled");
                None
            }
            None => {
                error!("ADMIN_ID is not set, admin features are disabled");
                None
            }
        };

        let slot_step_minutes =
            bounded(&lookup, "SLOT_STEP_MINUTES", DEFAULT_STEP_MINUTES, MAX_STEP_MINUTES)?;
        let booking_days_ahead = bounded(
            &lookup,
            "BOOKING_DAYS_AHEAD",
            DEFAULT_BOOKING_DAYS_AHEAD,
            MAX_BOOKING_DAYS_AHEAD,
        )?;

        // Optional test guild ID for development
        let test_guild_id = lookup("DISCORD_TEST_GUILD_ID").and_then(|id| id.parse::<u64>().ok());

        Ok(Self {
            token,
            application_id,
            database_url,
            admin_id,
            slot_step_minutes,
            booking_days_ahead,
            test_guild_id,
        })
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_id == Some(user_id)
    }
}

fn bounded(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: i64,
    max: i64,
) -> Result<i64> {
    let value = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .wrap_err_with(|| format!("{key} must be a number"))?,
        None => default,
    };
    if !(1..=max).contains(&value) {
        return Err(eyre!("{} must be between 1 and {}, got {}", key, max, value));
    }
    Ok(value)
}
