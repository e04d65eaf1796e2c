//! Discord integration.
//!
//! Adapts serenity's cache and REST client to the resolver scopes and hosts
//! the command bot.

pub mod cache;
pub mod client;
pub mod commands;
pub mod entity;
pub mod handler;

// Re-export main types for external use
pub use cache::{SerenityChannel, SerenityClient, SerenityGuild};
pub use client::{DiscordBot, DiscordBotBuilder};
pub use commands::Command;
pub use entity::{AuditAction, GuildInfo};
