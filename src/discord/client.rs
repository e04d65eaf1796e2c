//! Discord bot client.
//!
//! Builds the serenity client for the lookup bot and keeps it connected
//! until shutdown is requested.

use std::time::Duration;

use backon::BackoffBuilder;
use serenity::cache::Settings as CacheSettings;
use serenity::http::HttpBuilder;
use serenity::prelude::*;
use serenity::Client;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::types::Config;
use crate::discord::handler::FetcherHandler;

/// Messages kept per channel in the cache, searched before fetching history.
const CACHED_MESSAGES_PER_CHANNEL: usize = 200;

/// Longest wait between reconnection attempts.
const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(5 * 60);

/// Builder for creating the Discord bot.
pub struct DiscordBotBuilder {
    config: Config,
    shutdown_rx: watch::Receiver<bool>,
}

impl DiscordBotBuilder {
    pub fn new(config: Config, shutdown_rx: watch::Receiver<bool>) -> Self {
        Self {
            config,
            shutdown_rx,
        }
    }

    /// Build the first client up front so a bad token fails startup.
    pub async fn build(self) -> anyhow::Result<DiscordBot> {
        let client = build_client(&self.config).await?;

        info!(
            "Fetch defaults: cache={}, force={}, message window={}",
            self.config.fetch.use_cache, self.config.fetch.force, self.config.fetch.message_limit
        );

        Ok(DiscordBot {
            client: Some(client),
            config: self.config,
            shutdown_rx: self.shutdown_rx,
        })
    }
}

async fn build_client(config: &Config) -> anyhow::Result<Client> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MODERATION
        | GatewayIntents::GUILD_EMOJIS_AND_STICKERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let reqwest_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let http = HttpBuilder::new(&config.discord.token)
        .client(reqwest_client)
        .build();

    let mut cache_settings = CacheSettings::default();
    cache_settings.max_messages = CACHED_MESSAGES_PER_CHANNEL;

    let client = serenity::client::ClientBuilder::new_with_http(http, intents)
        .cache_settings(cache_settings)
        .event_handler(FetcherHandler::new(config))
        .await?;
    Ok(client)
}

/// 5s initial, factor 1.1, with jitter, unlimited retries.
fn reconnect_backoff() -> impl Iterator<Item = Duration> {
    backon::ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(5))
        .with_max_delay(MAX_RECONNECT_DELAY)
        .with_factor(1.1)
        .with_jitter()
        .without_max_times()
        .build()
}

/// Resolves once the shutdown flag is set. Never resolves if the sender is
/// gone without setting it.
async fn wait_for_shutdown(shutdown_rx: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown_rx.borrow_and_update() {
            return;
        }
        if shutdown_rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

pub struct DiscordBot {
    client: Option<Client>,
    config: Config,
    shutdown_rx: watch::Receiver<bool>,
}

impl DiscordBot {
    /// Run the gateway connection, reconnecting after failures, until
    /// shutdown is requested or the client stops on its own.
    pub async fn run(mut self) {
        let mut backoff = reconnect_backoff();

        loop {
            let mut client = match self.client.take() {
                Some(client) => client,
                None => match build_client(&self.config).await {
                    Ok(client) => client,
                    Err(e) => {
                        error!("Failed to rebuild Discord client: {}", e);
                        if !self.pause(&mut backoff).await {
                            break;
                        }
                        continue;
                    }
                },
            };

            info!("Connecting to Discord...");
            let shard_manager = client.shard_manager.clone();

            let result = tokio::select! {
                result = client.start() => result,
                _ = wait_for_shutdown(&mut self.shutdown_rx) => {
                    info!("Initiating graceful Discord shutdown...");
                    shard_manager.shutdown_all().await;
                    info!("Discord shutdown complete");
                    break;
                }
            };

            match result {
                Ok(()) => {
                    info!("Discord client disconnected normally");
                    break;
                }
                Err(e) => {
                    error!("Discord client error: {}", e);
                    if !self.pause(&mut backoff).await {
                        break;
                    }
                }
            }
        }
        info!("Discord task ended");
    }

    /// Sleep for the next backoff delay. Returns `false` if shutdown was
    /// requested meanwhile.
    async fn pause(&mut self, backoff: &mut impl Iterator<Item = Duration>) -> bool {
        let delay = backoff.next().unwrap_or(MAX_RECONNECT_DELAY);
        warn!("Reconnecting to Discord in {:.1}s...", delay.as_secs_f64());

        tokio::select! {
            _ = sleep(delay) => true,
            _ = wait_for_shutdown(&mut self.shutdown_rx) => false,
        }
    }
}
