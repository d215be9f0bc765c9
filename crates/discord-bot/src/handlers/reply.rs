//! Turning an [`Outcome`] into Discord responses.

use eyre::{ensure, Result};
use serenity::{
    model::{
        application::interaction::{
            application_command::ApplicationCommandInteraction,
            message_component::MessageComponentInteraction, InteractionResponseType,
        },
        channel::Message,
    },
    prelude::*,
};

use crate::{
    conversation::{clip, Outcome, Screen},
    keyboard::{self, MAX_ROWS},
};

/// Discord rejects a message with more action rows than it allows.
fn ensure_fits(screen: &Screen) -> Result<()> {
    ensure!(
        screen.keyboard.fits(),
        "Screen needs {} button rows, Discord allows {}",
        screen.keyboard.fitted().rows.len(),
        MAX_ROWS
    );
    Ok(())
}

/// Slash command answers are private to the caller.
pub async fn to_command(
    ctx: &Context,
    command: &ApplicationCommandInteraction,
    outcome: &Outcome,
) -> Result<()> {
    let Some(screen) = &outcome.screen else {
        let alert = outcome.alert.as_deref().unwrap_or("Done.");
        return command_alert(ctx, command, alert).await;
    };
    ensure_fits(screen)?;

    command
        .create_interaction_response(&ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| {
                    m.content(screen.clipped_text())
                        .components(|c| keyboard::render(&screen.keyboard, c))
                        .ephemeral(true)
                })
        })
        .await?;

    if let Some(alert) = &outcome.alert {
        command
            .create_followup_message(&ctx.http, |f| f.content(clip(alert)).ephemeral(true))
            .await?;
    }

    Ok(())
}

pub async fn command_alert(
    ctx: &Context,
    command: &ApplicationCommandInteraction,
    text: &str,
) -> Result<()> {
    command
        .create_interaction_response(&ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| m.content(clip(text)).ephemeral(true))
        })
        .await?;

    Ok(())
}

/// Button presses edit the message that carried the button.
pub async fn to_component(
    ctx: &Context,
    component: &MessageComponentInteraction,
    outcome: &Outcome,
) -> Result<()> {
    let Some(screen) = &outcome.screen else {
        let alert = outcome.alert.as_deref().unwrap_or("Done.");
        return component_alert(ctx, component, alert).await;
    };
    ensure_fits(screen)?;

    component
        .create_interaction_response(&ctx.http, |r| {
            r.kind(InteractionResponseType::UpdateMessage)
                .interaction_response_data(|m| {
                    m.content(screen.clipped_text())
                        .components(|c| keyboard::render(&screen.keyboard, c))
                })
        })
        .await?;

    if let Some(alert) = &outcome.alert {
        component
            .create_followup_message(&ctx.http, |f| f.content(clip(alert)).ephemeral(true))
            .await?;
    }

    Ok(())
}

pub async fn component_alert(
    ctx: &Context,
    component: &MessageComponentInteraction,
    text: &str,
) -> Result<()> {
    component
        .create_interaction_response(&ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| m.content(clip(text)).ephemeral(true))
        })
        .await?;

    Ok(())
}

pub async fn to_message(ctx: &Context, msg: &Message, outcome: &Outcome) -> Result<()> {
    if let Some(alert) = &outcome.alert {
        msg.reply(ctx, clip(alert)).await?;
    }

    if let Some(screen) = &outcome.screen {
        ensure_fits(screen)?;
        msg.channel_id
            .send_message(&ctx.http, |m| {
                m.content(screen.clipped_text())
                    .components(|c| keyboard::render(&screen.keyboard, c))
            })
            .await?;
    }

    Ok(())
}
