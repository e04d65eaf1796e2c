//! Entity accessors for serenity's model types.

use serenity::model::channel::{ChannelType, GuildChannel, Message};
use serenity::model::guild::audit_log::{Action, AuditLogEntry};
use serenity::model::guild::{Ban, Emoji, Guild, Member, PartialGuild, Role};
use serenity::model::user::User;

use crate::model::{
    AuditLogEntity, BanEntity, ChannelEntity, ChannelKind, EmojiEntity, GuildEntity,
    MemberEntity, MessageEntity, RoleEntity, UserEntity,
};

impl UserEntity for User {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn username(&self) -> &str {
        &self.name
    }

    fn tag(&self) -> String {
        User::tag(self)
    }
}

impl MemberEntity for Member {
    fn id(&self) -> String {
        self.user.id.to_string()
    }

    fn display_name(&self) -> &str {
        Member::display_name(self)
    }

    fn tag(&self) -> String {
        self.user.tag()
    }

    fn username(&self) -> &str {
        &self.user.name
    }
}

impl RoleEntity for Role {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl From<ChannelType> for ChannelKind {
    fn from(kind: ChannelType) -> Self {
        match kind {
            ChannelType::Text => Self::Text,
            ChannelType::Voice => Self::Voice,
            ChannelType::Category => Self::Category,
            ChannelType::News => Self::News,
            ChannelType::Stage => Self::Stage,
            ChannelType::Forum => Self::Forum,
            _ => Self::Other,
        }
    }
}

impl ChannelEntity for GuildChannel {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ChannelKind {
        self.kind.into()
    }
}

impl EmojiEntity for Emoji {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl MessageEntity for Message {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// A guild from the cache, or the partial guild the REST API returns.
#[derive(Debug, Clone)]
pub enum GuildInfo {
    Cached(Box<Guild>),
    Fetched(Box<PartialGuild>),
}

impl GuildEntity for GuildInfo {
    fn id(&self) -> String {
        match self {
            Self::Cached(guild) => guild.id.to_string(),
            Self::Fetched(guild) => guild.id.to_string(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Cached(guild) => &guild.name,
            Self::Fetched(guild) => &guild.name,
        }
    }
}

/// Audit-log action compared by its numeric wire value.
#[derive(Debug, Clone)]
pub struct AuditAction(pub Action);

impl PartialEq for AuditAction {
    fn eq(&self, other: &Self) -> bool {
        self.0.num() == other.0.num()
    }
}

impl AuditLogEntity for AuditLogEntry {
    type Action = AuditAction;

    fn action(&self) -> AuditAction {
        AuditAction(self.action.clone())
    }

    fn executor_id(&self) -> Option<String> {
        Some(self.user_id.to_string())
    }
}

impl BanEntity for Ban {
    fn user_id(&self) -> String {
        self.user.id.to_string()
    }

    fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}
