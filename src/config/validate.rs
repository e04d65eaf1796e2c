//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.discord.token.is_empty() {
        errors.push("discord.token is required".to_string());
    }
    if config.discord.token == "YOUR_DISCORD_TOKEN_HERE" {
        errors.push("discord.token has not been configured (still using placeholder)".to_string());
    }

    let prefix = &config.discord.command_prefix;
    if prefix.is_empty() {
        errors.push("discord.command_prefix must not be empty".to_string());
    } else if prefix.chars().any(char::is_whitespace) {
        errors.push(format!(
            "discord.command_prefix '{}' must not contain whitespace",
            prefix
        ));
    }

    if !(1..=100).contains(&config.fetch.message_limit) {
        errors.push(format!(
            "fetch.message_limit must be between 1 and 100 (got {})",
            config.fetch.message_limit
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}
