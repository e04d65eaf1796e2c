//! Discord entity fetchers.
//!
//! Resolves free-form queries (mentions, ids, tags, names) to users, members,
//! roles, channels, guilds, emojis, messages, audit-log entries and bans,
//! first from a client's cache and then over the REST API.

pub mod common;
pub mod config;
pub mod discord;
pub mod model;
pub mod resolve;

#[cfg(test)]
mod testing;
