//! Discord message event handling.
//!
//! Filters incoming messages down to commands and replies with the
//! resolver's answer.

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{debug, error, info, warn};

use crate::config::types::Config;
use crate::discord::commands::CommandHandler;

/// Discord event handler.
pub struct FetcherHandler {
    command_handler: CommandHandler,
}

impl FetcherHandler {
    pub fn new(config: &Config) -> Self {
        Self {
            command_handler: CommandHandler::new(
                config.discord.command_prefix.clone(),
                &config.fetch,
            ),
        }
    }

    /// Whether a message should be read as a command at all.
    fn is_candidate(&self, msg: &Message, content: &str) -> bool {
        !msg.author.bot && content.starts_with(self.command_handler.prefix())
    }
}

#[async_trait]
impl EventHandler for FetcherHandler {
    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore our own messages
        if msg.author.id == ctx.cache.current_user().id {
            return;
        }

        let content = msg.content.trim();
        if !self.is_candidate(&msg, content) {
            return;
        }

        let reply = match self.command_handler.handle_command(&ctx, &msg, content).await {
            Ok(Some(reply)) => reply,
            Ok(None) => {
                debug!("Ignoring unknown command: {}", content);
                return;
            }
            Err(e) => {
                warn!("Command '{}' from {} failed: {}", content, msg.author.name, e);
                format!("Lookup failed: {}", e)
            }
        };

        if let Err(e) = msg.channel_id.say(&ctx.http, reply).await {
            error!("Failed to reply in channel {}: {}", msg.channel_id, e);
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            "Discord bot connected as {} ({} guilds)",
            ready.user.name,
            ready.guilds.len()
        );
        info!(
            "Listening for commands with prefix '{}'",
            self.command_handler.prefix()
        );
    }
}
