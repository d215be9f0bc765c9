use eyre::Result;
use nailbook_core::{
    session::{Action, Session},
    store::BookingStore,
    time::salon_today,
};
use serenity::{
    async_trait,
    model::{
        application::{command::Command, interaction::Interaction},
        channel::Message,
        gateway::Ready,
        id::{GuildId, UserId},
    },
    prelude::*,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

pub mod reply;

use crate::{
    commands::menu,
    config::BotConfig,
    conversation::{Conversation, Input, Outcome, User},
};

const FAILURE: &str = "Something went wrong, please try again later.";

/// Main Discord handler that processes all events.
///
/// Owns the conversation engine and every user's dialogue session. Each
/// session sits behind its own lock, held for a whole exchange, so inputs from
/// one user are processed one at a time.
pub struct Handler {
    config: BotConfig,
    conversation: Conversation,
    sessions: Arc<RwLock<HashMap<u64, Arc<Mutex<Session>>>>>,
}

impl Handler {
    pub fn new(config: BotConfig, store: Arc<dyn BookingStore>) -> Self {
        let conversation = Conversation::from_config(store, &config);
        Self {
            config,
            conversation,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn session(&self, user_id: u64) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(&user_id) {
            return session.clone();
        }
        self.sessions
            .write()
            .await
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(Session::new(user_id))))
            .clone()
    }

    /// Run one input through the user's session. The session is only
    /// replaced when the input was handled without error.
    async fn converse(&self, user: &User, input: Input) -> Result<Outcome> {
        let session = self.session(user.id).await;
        let mut session = session.lock().await;

        let mut working = session.clone();
        let outcome = self
            .conversation
            .handle(&mut working, user, input, salon_today())
            .await?;

        *session = working;
        Ok(outcome)
    }

    async fn expects_text(&self, user_id: u64) -> bool {
        let Some(session) = self.sessions.read().await.get(&user_id).cloned() else {
            return false;
        };
        session.lock().await.phase().expects_text()
    }

    async fn notify_admin(&self, ctx: &Context, outcome: &Outcome) {
        let (Some(text), Some(admin_id)) = (&outcome.notify_admin, self.config.admin_id) else {
            return;
        };

        let sent = async {
            let channel = UserId(admin_id).create_dm_channel(ctx).await?;
            channel.say(&ctx.http, text).await?;
            Ok::<_, serenity::Error>(())
        };
        if let Err(why) = sent.await {
            error!("Failed to notify the salon admin: {:?}", why);
        }
    }
}

fn user_of(user: &serenity::model::user::User) -> User {
    User {
        id: user.id.0,
        username: user.name.clone(),
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Register slash commands once connected
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        // Guild commands show up immediately, global ones after Discord's cache delay
        if let Some(test_guild_id) = self.config.test_guild_id {
            match GuildId(test_guild_id)
                .set_application_commands(&ctx.http, crate::commands::register_commands)
                .await
            {
                Ok(cmds) => info!(
                    "Guild commands registered for {}: {}",
                    test_guild_id,
                    cmds.len()
                ),
                Err(why) => error!("Error registering guild commands: {:?}", why),
            }
        }

        match Command::set_global_application_commands(&ctx.http, crate::commands::register_commands)
            .await
        {
            Ok(cmds) => {
                for cmd in cmds {
                    info!("Command registered: /{} - {}", cmd.name, cmd.description);
                }
            }
            Err(why) => error!("Error registering global commands: {:?}", why),
        }
    }

    /// Handle slash commands and button presses
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                info!("Received command: {}", command.data.name);
                let user = user_of(&command.user);

                let input = match command.data.name.as_str() {
                    menu::START => Input::Start,
                    menu::BOOKINGS => Input::Action(Action::MyBookings),
                    other => {
                        warn!("Unknown command: {}", other);
                        return;
                    }
                };

                let result = match self.converse(&user, input).await {
                    Ok(outcome) => {
                        self.notify_admin(&ctx, &outcome).await;
                        reply::to_command(&ctx, &command, &outcome).await
                    }
                    Err(e) => {
                        error!("Error handling command for user {}: {:?}", user.id, e);
                        reply::command_alert(&ctx, &command, FAILURE).await
                    }
                };
                if let Err(why) = result {
                    error!("Failed to respond to command: {:?}", why);
                }
            }
            Interaction::MessageComponent(component) => {
                let user = user_of(&component.user);

                let action = match component.data.custom_id.parse::<Action>() {
                    Ok(action) => action,
                    Err(e) => {
                        warn!("User {} pressed a button we cannot parse: {}", user.id, e);
                        if let Err(why) = reply::component_alert(&ctx, &component, FAILURE).await {
                            error!("Failed to respond to component: {:?}", why);
                        }
                        return;
                    }
                };
                debug!("User {} pressed {}", user.id, action);

                let result = match self.converse(&user, Input::Action(action)).await {
                    Ok(outcome) => {
                        self.notify_admin(&ctx, &outcome).await;
                        reply::to_component(&ctx, &component, &outcome).await
                    }
                    Err(e) => {
                        error!("Error handling {} for user {}: {:?}", action, user.id, e);
                        reply::component_alert(&ctx, &component, FAILURE).await
                    }
                };
                if let Err(why) = result {
                    error!("Failed to respond to component: {:?}", why);
                }
            }
            _ => {}
        }
    }

    /// Free text feeds the admin input steps. In servers only messages from
    /// users who are in such a step are considered.
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let user = user_of(&msg.author);
        if msg.guild_id.is_some() && !self.expects_text(user.id).await {
            return;
        }

        let result = match self.converse(&user, Input::Text(msg.content.clone())).await {
            Ok(outcome) => {
                self.notify_admin(&ctx, &outcome).await;
                reply::to_message(&ctx, &msg, &outcome).await
            }
            Err(e) => {
                error!("Error handling message from user {}: {:?}", user.id, e);
                msg.reply(&ctx, FAILURE).await.map(|_| ()).map_err(Into::into)
            }
        };
        if let Err(why) = result {
            error!("Failed to answer message: {:?}", why);
        }
    }
}
