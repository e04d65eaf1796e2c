//! In-memory client used by the resolver tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serenity::async_trait;

use crate::model::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeError(pub &'static str);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeUser {
    pub id: String,
    pub username: String,
    pub discriminator: Option<String>,
}

pub fn user(id: &str, username: &str, discriminator: &str) -> FakeUser {
    FakeUser {
        id: id.to_string(),
        username: username.to_string(),
        discriminator: Some(discriminator.to_string()),
    }
}

impl UserEntity for FakeUser {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn tag(&self) -> String {
        match &self.discriminator {
            Some(discriminator) => format!("{}#{}", self.username, discriminator),
            None => self.username.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeMember {
    pub user: FakeUser,
    pub nick: Option<String>,
}

pub fn member(user: FakeUser, nick: Option<&str>) -> FakeMember {
    FakeMember {
        user,
        nick: nick.map(str::to_string),
    }
}

impl MemberEntity for FakeMember {
    fn id(&self) -> String {
        self.user.id.clone()
    }

    fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or(&self.user.username)
    }

    fn tag(&self) -> String {
        self.user.tag()
    }

    fn username(&self) -> &str {
        &self.user.username
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeNamed {
    pub id: String,
    pub name: String,
}

pub fn named(id: &str, name: &str) -> FakeNamed {
    FakeNamed {
        id: id.to_string(),
        name: name.to_string(),
    }
}

impl RoleEntity for FakeNamed {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl GuildEntity for FakeNamed {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl EmojiEntity for FakeNamed {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeChannel {
    pub id: String,
    pub name: String,
    pub kind: ChannelKind,
}

pub fn channel(id: &str, name: &str, kind: ChannelKind) -> FakeChannel {
    FakeChannel {
        id: id.to_string(),
        name: name.to_string(),
        kind,
    }
}

impl ChannelEntity for FakeChannel {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ChannelKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeMessage {
    pub id: String,
    pub content: String,
}

pub fn message(id: &str, content: &str) -> FakeMessage {
    FakeMessage {
        id: id.to_string(),
        content: content.to_string(),
    }
}

impl MessageEntity for FakeMessage {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeAction {
    Kick,
    Ban,
    RoleUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeAuditEntry {
    pub id: String,
    pub action: FakeAction,
    pub executor: Option<String>,
}

pub fn audit(id: &str, action: FakeAction, executor: Option<&str>) -> FakeAuditEntry {
    FakeAuditEntry {
        id: id.to_string(),
        action,
        executor: executor.map(str::to_string),
    }
}

impl AuditLogEntity for FakeAuditEntry {
    type Action = FakeAction;

    fn action(&self) -> FakeAction {
        self.action
    }

    fn executor_id(&self) -> Option<String> {
        self.executor.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeBan {
    pub user: FakeUser,
    pub reason: Option<String>,
}

pub fn ban(user: FakeUser, reason: &str) -> FakeBan {
    FakeBan {
        user,
        reason: Some(reason.to_string()),
    }
}

impl BanEntity for FakeBan {
    fn user_id(&self) -> String {
        self.user.id.clone()
    }

    fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// Counts network calls and optionally fails them.
#[derive(Debug, Default)]
pub struct Network {
    calls: AtomicUsize,
    failure: Option<FakeError>,
    stored: Mutex<Vec<String>>,
}

impl Network {
    pub fn failing(error: FakeError) -> Self {
        Self {
            failure: Some(error),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Ids of fetched entities the caller asked to cache.
    pub fn stored(&self) -> Vec<String> {
        self.stored.lock().unwrap().clone()
    }

    fn store(&self, id: &str) {
        self.stored.lock().unwrap().push(id.to_string());
    }

    fn call(&self) -> Result<(), FakeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn lookup<T: Clone>(
    cached: &[T],
    remote: &HashMap<String, T>,
    id: &str,
    options: FetchOptions,
    network: &Network,
    id_of: impl Fn(&T) -> String,
) -> Result<Option<T>, FakeError> {
    if options.allows_cache() {
        if let Some(hit) = cached.iter().find(|item| id_of(item) == id) {
            return Ok(Some(hit.clone()));
        }
    }
    network.call()?;
    let fetched = remote.get(id).cloned();
    if fetched.is_some() && options.stores_result() {
        network.store(id);
    }
    Ok(fetched)
}

/// Client-wide caches: users and guilds.
#[derive(Debug, Default)]
pub struct FakeClient {
    pub users: Vec<FakeUser>,
    pub remote_users: HashMap<String, FakeUser>,
    pub guilds: Vec<FakeNamed>,
    pub remote_guilds: HashMap<String, FakeNamed>,
    pub network: Network,
}

impl FakeClient {
    pub fn with_users(users: Vec<FakeUser>) -> Self {
        Self {
            users,
            ..Default::default()
        }
    }
}

#[async_trait]
impl UserSource for FakeClient {
    type User = FakeUser;
    type Error = FakeError;

    fn cached_users(&self) -> Vec<FakeUser> {
        self.users.clone()
    }

    async fn fetch_user(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<FakeUser>, FakeError> {
        lookup(&self.users, &self.remote_users, id, options, &self.network, |u| u.id.clone())
    }
}

#[async_trait]
impl GuildSource for FakeClient {
    type Guild = FakeNamed;
    type Error = FakeError;

    fn cached_guilds(&self) -> Vec<FakeNamed> {
        self.guilds.clone()
    }

    async fn fetch_guild(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<FakeNamed>, FakeError> {
        lookup(&self.guilds, &self.remote_guilds, id, options, &self.network, |g| g.id.clone())
    }
}

/// One guild with its caches and server-side state.
#[derive(Debug, Default)]
pub struct FakeGuild {
    pub members: Vec<FakeMember>,
    pub remote_members: HashMap<String, FakeMember>,
    pub roles: Vec<FakeNamed>,
    pub remote_roles: HashMap<String, FakeNamed>,
    pub channels: Vec<FakeChannel>,
    pub remote_channels: HashMap<String, FakeChannel>,
    pub emojis: Vec<FakeNamed>,
    pub remote_emojis: HashMap<String, FakeNamed>,
    pub audit_log: Vec<FakeAuditEntry>,
    /// Answer audit-log requests without applying the action filter.
    pub ignores_action_filter: bool,
    pub bans: Vec<FakeBan>,
    pub network: Network,
}

#[async_trait]
impl GuildScope for FakeGuild {
    type Member = FakeMember;
    type Role = FakeNamed;
    type Channel = FakeChannel;
    type Emoji = FakeNamed;
    type AuditLogEntry = FakeAuditEntry;
    type Ban = FakeBan;
    type Error = FakeError;

    fn cached_members(&self) -> Vec<FakeMember> {
        self.members.clone()
    }

    fn cached_roles(&self) -> Vec<FakeNamed> {
        self.roles.clone()
    }

    fn cached_channels(&self) -> Vec<FakeChannel> {
        self.channels.clone()
    }

    fn cached_emojis(&self) -> Vec<FakeNamed> {
        self.emojis.clone()
    }

    async fn fetch_member(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<FakeMember>, FakeError> {
        lookup(&self.members, &self.remote_members, id, options, &self.network, |m| {
            m.user.id.clone()
        })
    }

    async fn fetch_role(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<FakeNamed>, FakeError> {
        lookup(&self.roles, &self.remote_roles, id, options, &self.network, |r| r.id.clone())
    }

    async fn fetch_channel(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<FakeChannel>, FakeError> {
        lookup(&self.channels, &self.remote_channels, id, options, &self.network, |c| {
            c.id.clone()
        })
    }

    async fn fetch_emoji(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<FakeNamed>, FakeError> {
        lookup(&self.emojis, &self.remote_emojis, id, options, &self.network, |e| e.id.clone())
    }

    async fn fetch_audit_logs(
        &self,
        action: &FakeAction,
    ) -> Result<Vec<FakeAuditEntry>, FakeError> {
        self.network.call()?;
        Ok(self
            .audit_log
            .iter()
            .filter(|entry| self.ignores_action_filter || entry.action == *action)
            .cloned()
            .collect())
    }

    async fn fetch_bans(&self) -> Result<Vec<FakeBan>, FakeError> {
        self.network.call()?;
        Ok(self.bans.clone())
    }
}

/// One text channel with cached and server-side history.
#[derive(Debug, Default)]
pub struct FakeChannelScope {
    pub messages: Vec<FakeMessage>,
    pub history: Vec<FakeMessage>,
    pub network: Network,
}

#[async_trait]
impl ChannelScope for FakeChannelScope {
    type Message = FakeMessage;
    type Error = FakeError;

    fn cached_messages(&self) -> Vec<FakeMessage> {
        self.messages.clone()
    }

    async fn fetch_message(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<FakeMessage>, FakeError> {
        if options.allows_cache() {
            if let Some(hit) = self.messages.iter().find(|m| m.id == id) {
                return Ok(Some(hit.clone()));
            }
        }
        self.network.call()?;
        Ok(self.history.iter().find(|m| m.id == id).cloned())
    }

    async fn fetch_messages(
        &self,
        options: &MessageFetchOptions,
    ) -> Result<Vec<FakeMessage>, FakeError> {
        self.network.call()?;
        let limit = options.limit.map(usize::from).unwrap_or(50);
        Ok(self.history.iter().take(limit).cloned().collect())
    }
}
