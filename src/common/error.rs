//! Error types for the host layers.
//!
//! Resolvers do not have an error type of their own: a miss is `None` and a
//! transport failure is the client's error, returned as-is.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {message}")]
    IoError { path: String, message: String },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Errors raised while parsing or running a bot command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing argument: {name}")]
    MissingArgument { name: &'static str },

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ParseKindError),

    #[error("'{command}' can only be used inside a server")]
    GuildOnly { command: &'static str },

    #[error("Discord error: {0}")]
    Serenity(#[from] serenity::Error),
}

/// Error returned when a channel kind or entry position cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} '{value}'")]
pub struct ParseKindError {
    pub(crate) what: &'static str,
    pub(crate) value: String,
}

/// Result type alias for command handling.
pub type CommandResult<T> = std::result::Result<T, CommandError>;
