//! Scopes a query is resolved in: the client, a guild, a channel.
//!
//! Cache snapshots are returned in the client's iteration order, which is
//! what "first" and "last" refer to. Fetch methods issue exactly one request
//! and hand back the client's own error type untouched.

use serenity::async_trait;

use super::{
    AuditLogEntity, BanEntity, ChannelEntity, EmojiEntity, FetchOptions, GuildEntity,
    MemberEntity, MessageEntity, MessageFetchOptions, RoleEntity, UserEntity,
};

/// The client-wide user cache and user fetch.
#[async_trait]
pub trait UserSource: Send + Sync {
    type User: UserEntity + Send;
    type Error: Send;

    fn cached_users(&self) -> Vec<Self::User>;

    async fn fetch_user(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<Self::User>, Self::Error>;
}

/// The client-wide guild cache and guild fetch.
#[async_trait]
pub trait GuildSource: Send + Sync {
    type Guild: GuildEntity + Send;
    type Error: Send;

    fn cached_guilds(&self) -> Vec<Self::Guild>;

    async fn fetch_guild(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<Self::Guild>, Self::Error>;
}

/// A single guild: its member, role, channel and emoji caches plus the
/// per-guild network calls.
#[async_trait]
pub trait GuildScope: Send + Sync {
    type Member: MemberEntity + Send;
    type Role: RoleEntity + Send;
    type Channel: ChannelEntity + Send;
    type Emoji: EmojiEntity + Send;
    type AuditLogEntry: AuditLogEntity + Send;
    type Ban: BanEntity + Send;
    type Error: Send;

    fn cached_members(&self) -> Vec<Self::Member>;
    fn cached_roles(&self) -> Vec<Self::Role>;
    fn cached_channels(&self) -> Vec<Self::Channel>;
    fn cached_emojis(&self) -> Vec<Self::Emoji>;

    async fn fetch_member(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<Self::Member>, Self::Error>;

    async fn fetch_role(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<Self::Role>, Self::Error>;

    async fn fetch_channel(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<Self::Channel>, Self::Error>;

    async fn fetch_emoji(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<Self::Emoji>, Self::Error>;

    /// Fetch the audit log, filtered server-side by action type only.
    async fn fetch_audit_logs(
        &self,
        action: &<Self::AuditLogEntry as AuditLogEntity>::Action,
    ) -> Result<Vec<Self::AuditLogEntry>, Self::Error>;

    async fn fetch_bans(&self) -> Result<Vec<Self::Ban>, Self::Error>;
}

/// A single text channel's message cache and message fetches.
#[async_trait]
pub trait ChannelScope: Send + Sync {
    type Message: MessageEntity + Send;
    type Error: Send;

    fn cached_messages(&self) -> Vec<Self::Message>;

    async fn fetch_message(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<Self::Message>, Self::Error>;

    async fn fetch_messages(
        &self,
        options: &MessageFetchOptions,
    ) -> Result<Vec<Self::Message>, Self::Error>;
}
