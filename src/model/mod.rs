//! Entity and scope abstractions the resolvers read from.
//!
//! The resolvers never own a Discord client. They see entities through the
//! small accessor traits below and reach caches and the network through the
//! scope traits in [`source`].

pub mod source;

use std::fmt;
use std::str::FromStr;

use crate::common::error::ParseKindError;

pub use source::{ChannelScope, GuildScope, GuildSource, UserSource};

/// A Discord user as seen by the user matcher.
pub trait UserEntity {
    fn id(&self) -> String;
    fn username(&self) -> &str;
    /// `name#discriminator`, or the bare name for migrated accounts.
    fn tag(&self) -> String;
}

/// A member of a guild.
pub trait MemberEntity {
    fn id(&self) -> String;
    /// Nickname if set, otherwise the user's name.
    fn display_name(&self) -> &str;
    fn tag(&self) -> String;
    fn username(&self) -> &str;
}

pub trait RoleEntity {
    fn id(&self) -> String;
    fn name(&self) -> &str;
}

pub trait ChannelEntity {
    fn id(&self) -> String;
    fn name(&self) -> &str;
    fn kind(&self) -> ChannelKind;
}

pub trait GuildEntity {
    fn id(&self) -> String;
    fn name(&self) -> &str;
}

pub trait EmojiEntity {
    fn id(&self) -> String;
    fn name(&self) -> &str;
}

pub trait MessageEntity {
    fn id(&self) -> String;
    fn content(&self) -> &str;
}

/// An entry of a guild's audit log.
pub trait AuditLogEntity {
    /// The action type, compared for equality against the requested one.
    type Action: PartialEq + Send + Sync;

    fn action(&self) -> Self::Action;
    /// Id of the user who performed the action, if the log recorded one.
    fn executor_id(&self) -> Option<String>;
}

/// A guild ban.
pub trait BanEntity {
    fn user_id(&self) -> String;
    fn reason(&self) -> Option<&str>;
}

/// Concrete kind of a guild channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Text,
    Voice,
    Category,
    News,
    Store,
    Stage,
    Forum,
    /// Threads, directories and anything the filter cannot name.
    Other,
}

impl ChannelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Voice => "voice",
            Self::Category => "category",
            Self::News => "news",
            Self::Store => "store",
            Self::Stage => "stage",
            Self::Forum => "forum",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "voice" => Ok(Self::Voice),
            "category" => Ok(Self::Category),
            "news" => Ok(Self::News),
            "store" => Ok(Self::Store),
            "stage" => Ok(Self::Stage),
            "forum" => Ok(Self::Forum),
            _ => Err(ParseKindError {
                what: "channel kind",
                value: s.to_string(),
            }),
        }
    }
}

/// Flags forwarded to every fetch-by-id call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Store a fetched entity in the client's cache. Clients whose REST
    /// responses never reach their cache ignore it.
    pub cache: bool,
    /// Skip the cache and always hit the network.
    pub force: bool,
}

impl FetchOptions {
    pub fn new(cache: bool, force: bool) -> Self {
        Self { cache, force }
    }

    /// Whether the cache may answer this fetch. Only `force` decides.
    pub fn allows_cache(self) -> bool {
        !self.force
    }

    /// Whether an entity fetched over the network should be cached.
    pub fn stores_result(self) -> bool {
        self.cache
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            cache: true,
            force: false,
        }
    }
}

/// Window of channel history to pull with a bulk message fetch.
///
/// `before`, `after` and `around` are message ids; the client decides what
/// happens when more than one is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFetchOptions {
    pub limit: Option<u8>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub around: Option<String>,
}

impl MessageFetchOptions {
    pub fn limit(mut self, limit: u8) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn before(mut self, id: impl Into<String>) -> Self {
        self.before = Some(id.into());
        self
    }

    pub fn after(mut self, id: impl Into<String>) -> Self {
        self.after = Some(id.into());
        self
    }

    pub fn around(mut self, id: impl Into<String>) -> Self {
        self.around = Some(id.into());
        self
    }
}

/// Which end of a filtered audit-log or ban list to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPosition {
    First,
    Last,
}

impl EntryPosition {
    /// Pick the entry at this position, in collection order.
    pub fn select<T>(self, entries: Vec<T>) -> Option<T> {
        match self {
            Self::First => entries.into_iter().next(),
            Self::Last => entries.into_iter().last(),
        }
    }
}

impl FromStr for EntryPosition {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            _ => Err(ParseKindError {
                what: "entry position",
                value: s.to_string(),
            }),
        }
    }
}
