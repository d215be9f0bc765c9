use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use nailbook_db::{create_pool, schema::initialize_database, PgStore};
use nailbook_discord_bot::config::BotConfig;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Nailbook Discord bot");

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = BotConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Start the Discord bot
    match nailbook_discord_bot::start_bot(config, Arc::new(PgStore::new(db_pool))).await {
        Ok(_) => info!("Discord bot shut down gracefully"),
        Err(e) => error!("Discord bot error: {}", e),
    }

    Ok(())
}
