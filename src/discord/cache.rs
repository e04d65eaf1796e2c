//! Scope implementations over serenity's cache and HTTP client.
//!
//! Serenity keeps its caches in hash maps, so snapshots are sorted by
//! snowflake id, which orders them by creation time.
//!
//! Serenity's cache is fed by gateway events only. REST responses are never
//! written back, so [`FetchOptions::cache`] has no effect here; `force`
//! alone decides whether the cache may answer.

use std::sync::Arc;

use serenity::async_trait;
use serenity::builder::GetMessages;
use serenity::cache::Cache;
use serenity::client::Context;
use serenity::http::Http;
use serenity::model::channel::{GuildChannel, Message};
use serenity::model::guild::audit_log::AuditLogEntry;
use serenity::model::guild::{Ban, Emoji, Guild, Member, Role};
use serenity::model::id::{ChannelId, EmojiId, GuildId, MessageId, RoleId, UserId};
use serenity::model::user::User;
use tracing::debug;

use crate::discord::entity::{AuditAction, GuildInfo};
use crate::model::{
    ChannelScope, FetchOptions, GuildScope, GuildSource, MessageFetchOptions, UserSource,
};

/// Parse a snowflake. Zero is not a valid id.
fn parse_id(id: &str) -> Option<u64> {
    id.parse::<u64>().ok().filter(|value| *value != 0)
}

fn sorted_by<T, K: Ord>(mut items: Vec<T>, key: impl FnMut(&T) -> K) -> Vec<T> {
    items.sort_by_key(key);
    items
}

/// A connected serenity client seen through the resolver scopes.
#[derive(Clone)]
pub struct SerenityClient {
    cache: Arc<Cache>,
    http: Arc<Http>,
}

impl SerenityClient {
    pub fn new(cache: Arc<Cache>, http: Arc<Http>) -> Self {
        Self { cache, http }
    }

    pub fn from_context(ctx: &Context) -> Self {
        Self::new(ctx.cache.clone(), ctx.http.clone())
    }

    /// Scope for one guild.
    pub fn guild(&self, guild_id: GuildId) -> SerenityGuild {
        SerenityGuild {
            client: self.clone(),
            guild_id,
        }
    }

    /// Scope for one channel.
    pub fn channel(&self, channel_id: ChannelId) -> SerenityChannel {
        SerenityChannel {
            client: self.clone(),
            channel_id,
        }
    }

    fn cached_user(&self, user_id: UserId) -> Option<User> {
        self.cache.user(user_id).map(|user| User::clone(&user))
    }

    fn cached_guild(&self, guild_id: GuildId) -> Option<Guild> {
        self.cache.guild(guild_id).map(|guild| Guild::clone(&guild))
    }
}

#[async_trait]
impl UserSource for SerenityClient {
    type User = User;
    type Error = serenity::Error;

    /// The client-wide user cache, fed by member, presence and message events.
    fn cached_users(&self) -> Vec<User> {
        let users = self
            .cache
            .users()
            .iter()
            .map(|entry| entry.value().clone())
            .collect::<Vec<_>>();

        sorted_by(users, |user: &User| user.id)
    }

    async fn fetch_user(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<User>, serenity::Error> {
        let Some(user_id) = parse_id(id).map(UserId::new) else {
            debug!("Not a user id: {}", id);
            return Ok(None);
        };

        if options.allows_cache() {
            if let Some(user) = self.cached_user(user_id) {
                return Ok(Some(user));
            }
        }

        self.http.get_user(user_id).await.map(Some)
    }
}

#[async_trait]
impl GuildSource for SerenityClient {
    type Guild = GuildInfo;
    type Error = serenity::Error;

    fn cached_guilds(&self) -> Vec<GuildInfo> {
        let guilds: Vec<Guild> = self
            .cache
            .guilds()
            .into_iter()
            .filter_map(|guild_id| self.cached_guild(guild_id))
            .collect();

        sorted_by(guilds, |guild: &Guild| guild.id)
            .into_iter()
            .map(|guild| GuildInfo::Cached(Box::new(guild)))
            .collect()
    }

    async fn fetch_guild(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<GuildInfo>, serenity::Error> {
        let Some(guild_id) = parse_id(id).map(GuildId::new) else {
            debug!("Not a guild id: {}", id);
            return Ok(None);
        };

        if options.allows_cache() {
            if let Some(guild) = self.cached_guild(guild_id) {
                return Ok(Some(GuildInfo::Cached(Box::new(guild))));
            }
        }

        let guild = self.http.get_guild(guild_id).await?;
        Ok(Some(GuildInfo::Fetched(Box::new(guild))))
    }
}

/// One guild of a [`SerenityClient`].
#[derive(Clone)]
pub struct SerenityGuild {
    client: SerenityClient,
    guild_id: GuildId,
}

impl SerenityGuild {
    pub fn id(&self) -> GuildId {
        self.guild_id
    }

    fn with_guild<T>(&self, f: impl FnOnce(&Guild) -> T) -> Option<T> {
        self.client.cache.guild(self.guild_id).map(|guild| f(&guild))
    }
}

#[async_trait]
impl GuildScope for SerenityGuild {
    type Member = Member;
    type Role = Role;
    type Channel = GuildChannel;
    type Emoji = Emoji;
    type AuditLogEntry = AuditLogEntry;
    type Ban = Ban;
    type Error = serenity::Error;

    fn cached_members(&self) -> Vec<Member> {
        self.with_guild(|guild| guild.members.values().cloned().collect::<Vec<_>>())
            .map(|members| sorted_by(members, |member: &Member| member.user.id))
            .unwrap_or_default()
    }

    fn cached_roles(&self) -> Vec<Role> {
        self.with_guild(|guild| guild.roles.values().cloned().collect::<Vec<_>>())
            .map(|roles| sorted_by(roles, |role: &Role| role.id))
            .unwrap_or_default()
    }

    fn cached_channels(&self) -> Vec<GuildChannel> {
        self.with_guild(|guild| guild.channels.values().cloned().collect::<Vec<_>>())
            .map(|channels| sorted_by(channels, |channel: &GuildChannel| channel.id))
            .unwrap_or_default()
    }

    fn cached_emojis(&self) -> Vec<Emoji> {
        self.with_guild(|guild| guild.emojis.values().cloned().collect::<Vec<_>>())
            .map(|emojis| sorted_by(emojis, |emoji: &Emoji| emoji.id))
            .unwrap_or_default()
    }

    async fn fetch_member(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<Member>, serenity::Error> {
        let Some(user_id) = parse_id(id).map(UserId::new) else {
            debug!("Not a member id: {}", id);
            return Ok(None);
        };

        if options.allows_cache() {
            let cached = self
                .with_guild(|guild| guild.members.get(&user_id).cloned())
                .flatten();
            if cached.is_some() {
                return Ok(cached);
            }
        }

        self.client
            .http
            .get_member(self.guild_id, user_id)
            .await
            .map(Some)
    }

    async fn fetch_role(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<Role>, serenity::Error> {
        let Some(role_id) = parse_id(id).map(RoleId::new) else {
            debug!("Not a role id: {}", id);
            return Ok(None);
        };

        if options.allows_cache() {
            let cached = self
                .with_guild(|guild| guild.roles.get(&role_id).cloned())
                .flatten();
            if cached.is_some() {
                return Ok(cached);
            }
        }

        let roles = self.client.http.get_guild_roles(self.guild_id).await?;
        Ok(roles.into_iter().find(|role| role.id == role_id))
    }

    async fn fetch_channel(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<GuildChannel>, serenity::Error> {
        let Some(channel_id) = parse_id(id).map(ChannelId::new) else {
            debug!("Not a channel id: {}", id);
            return Ok(None);
        };

        if options.allows_cache() {
            let cached = self
                .with_guild(|guild| guild.channels.get(&channel_id).cloned())
                .flatten();
            if cached.is_some() {
                return Ok(cached);
            }
        }

        let channels = self.client.http.get_channels(self.guild_id).await?;
        Ok(channels.into_iter().find(|channel| channel.id == channel_id))
    }

    async fn fetch_emoji(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<Emoji>, serenity::Error> {
        let Some(emoji_id) = parse_id(id).map(EmojiId::new) else {
            debug!("Not an emoji id: {}", id);
            return Ok(None);
        };

        if options.allows_cache() {
            let cached = self
                .with_guild(|guild| guild.emojis.get(&emoji_id).cloned())
                .flatten();
            if cached.is_some() {
                return Ok(cached);
            }
        }

        self.client
            .http
            .get_emoji(self.guild_id, emoji_id)
            .await
            .map(Some)
    }

    async fn fetch_audit_logs(
        &self,
        action: &AuditAction,
    ) -> Result<Vec<AuditLogEntry>, serenity::Error> {
        let logs = self
            .guild_id
            .audit_logs(&self.client.http, Some(action.0.clone()), None, None, None)
            .await?;
        debug!(
            "Fetched {} audit log entries from guild {}",
            logs.entries.len(),
            self.guild_id
        );
        Ok(logs.entries)
    }

    async fn fetch_bans(&self) -> Result<Vec<Ban>, serenity::Error> {
        let bans = self.guild_id.bans(&self.client.http, None, None).await?;
        debug!("Fetched {} bans from guild {}", bans.len(), self.guild_id);
        Ok(bans)
    }
}

/// One text channel of a [`SerenityClient`].
#[derive(Clone)]
pub struct SerenityChannel {
    client: SerenityClient,
    channel_id: ChannelId,
}

impl SerenityChannel {
    pub fn id(&self) -> ChannelId {
        self.channel_id
    }

    fn cached_message(&self, message_id: MessageId) -> Option<Message> {
        self.client
            .cache
            .message(self.channel_id, message_id)
            .map(|message| Message::clone(&message))
    }
}

#[async_trait]
impl ChannelScope for SerenityChannel {
    type Message = Message;
    type Error = serenity::Error;

    fn cached_messages(&self) -> Vec<Message> {
        self.client
            .cache
            .channel_messages(self.channel_id)
            .map(|messages| messages.values().cloned().collect::<Vec<_>>())
            .map(|messages| sorted_by(messages, |message: &Message| message.id))
            .unwrap_or_default()
    }

    async fn fetch_message(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<Message>, serenity::Error> {
        let Some(message_id) = parse_id(id).map(MessageId::new) else {
            debug!("Not a message id: {}", id);
            return Ok(None);
        };

        if options.allows_cache() {
            if let Some(message) = self.cached_message(message_id) {
                return Ok(Some(message));
            }
        }

        self.client
            .http
            .get_message(self.channel_id, message_id)
            .await
            .map(Some)
    }

    async fn fetch_messages(
        &self,
        options: &MessageFetchOptions,
    ) -> Result<Vec<Message>, serenity::Error> {
        let mut builder = GetMessages::new();
        if let Some(limit) = options.limit {
            builder = builder.limit(limit);
        }
        if let Some(id) = options.before.as_deref().and_then(parse_id) {
            builder = builder.before(MessageId::new(id));
        }
        if let Some(id) = options.after.as_deref().and_then(parse_id) {
            builder = builder.after(MessageId::new(id));
        }
        if let Some(id) = options.around.as_deref().and_then(parse_id) {
            builder = builder.around(MessageId::new(id));
        }

        let mut messages = self
            .channel_id
            .messages(&*self.client.http, builder)
            .await?;
        // The API returns newest first.
        messages.reverse();
        Ok(messages)
    }
}
