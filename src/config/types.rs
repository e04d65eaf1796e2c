//! Configuration type definitions.

use serde::Deserialize;

use crate::model::FetchOptions;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    pub token: String,
    /// Prefix that marks a message as a bot command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

/// Defaults applied to the lookups the bot runs.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Let fetch-by-id calls answer from the cache.
    #[serde(default = "default_true")]
    pub use_cache: bool,
    /// Always go to the network on fetch-by-id calls.
    #[serde(default)]
    pub force: bool,
    /// Size of the history window searched when a message is not cached.
    #[serde(default = "default_message_limit")]
    pub message_limit: u8,
}

impl FetchConfig {
    pub fn options(&self) -> FetchOptions {
        FetchOptions::new(self.use_cache, self.force)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            force: false,
            message_limit: default_message_limit(),
        }
    }
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_true() -> bool {
    true
}

fn default_message_limit() -> u8 {
    50
}
