//! # Nailbook Discord bot
//!
//! Serenity front end for the salon booking dialogue. The dialogue itself
//! lives in [`conversation`] and is platform-neutral; [`handlers`] only
//! translates Discord events into conversation inputs and renders the
//! outcome back.

use eyre::Result;
use nailbook_core::store::BookingStore;
use serenity::{prelude::GatewayIntents, Client};
use std::sync::Arc;
use tracing::info;

pub mod commands;
pub mod config;
pub mod conversation;
pub mod handlers;
pub mod keyboard;

/// Start the Discord bot and run until it disconnects.
///
/// Message content is needed for the admin text steps in server channels;
/// enable the Message Content intent for the application in the Discord
/// developer portal.
pub async fn start_bot(config: config::BotConfig, store: Arc<dyn BookingStore>) -> Result<()> {
    info!("Starting Discord bot");

    let handler = handlers::Handler::new(config.clone(), store);

    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&config.token, intents)
        .application_id(config.application_id)
        .event_handler(handler)
        .await?;

    info!("Connecting to Discord...");
    client.start().await?;

    Ok(())
}
