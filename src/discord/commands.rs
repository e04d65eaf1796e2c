//! Discord bot commands (!user, !role, !audit, etc).
//!
//! Handles command parsing and runs each command against the matching
//! resolver.

use serenity::model::channel::Message;
use serenity::model::guild::audit_log::{
    Action, ChannelAction, EmojiAction, MemberAction, MessageAction, RoleAction,
};
use serenity::prelude::*;
use tracing::{debug, info};

use crate::common::error::{CommandError, CommandResult, ParseKindError};
use crate::config::types::FetchConfig;
use crate::discord::cache::SerenityClient;
use crate::discord::entity::AuditAction;
use crate::model::{
    AuditLogEntity, BanEntity, ChannelEntity, ChannelKind, EmojiEntity, EntryPosition,
    FetchOptions, GuildEntity, MemberEntity, MessageEntity, MessageFetchOptions, RoleEntity,
    UserEntity,
};
use crate::resolve::{
    AuditLogResolver, BanResolver, ChannelResolver, EmojiResolver, GuildMemberResolver,
    GuildResolver, Mention, MessageResolver, Query, RoleResolver, UserResolver,
};

/// Longest message content still considered as a command.
const MAX_COMMAND_LENGTH: usize = 200;

/// Longest message excerpt quoted in a reply.
const EXCERPT_LENGTH: usize = 80;

const HELP_TEXT: &str = r#"**Available Commands:**
• `{p}user <query>` - Find a user by mention, id, tag or name
• `{p}member <query>` - Find a member of this server
• `{p}role <query>` - Find a role by name, mention or id
• `{p}channel <query> [kind]` - Find a channel, optionally of one kind (text, voice, category, news, stage, forum)
• `{p}guild <query>` - Find a server by name or id
• `{p}emoji <query>` - Find a custom emoji by name, id, `:name:` or `<:name:id>`
• `{p}message <query>` - Find a message in this channel by start, end or id
• `{p}audit <action> <first|last> <executor>` - Find an audit-log entry (kick, ban, unban, role_update, ...)
• `{p}ban <first|last> <query>` - Find the ban of a user
• `{p}help` - Show this help message"#;

/// A parsed bot command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    User(String),
    Member(String),
    Role(String),
    Channel {
        query: String,
        kind: Option<ChannelKind>,
    },
    Guild(String),
    Emoji(String),
    Message(String),
    Audit {
        action: AuditAction,
        position: EntryPosition,
        executor: String,
    },
    Ban {
        position: EntryPosition,
        query: String,
    },
    Help,
}

impl Command {
    /// Parse a message content into a command.
    ///
    /// Returns `None` when the content is not addressed to the bot or names
    /// an unknown command.
    pub fn parse(content: &str, prefix: &str) -> Option<CommandResult<Self>> {
        if content.len() > MAX_COMMAND_LENGTH {
            return None;
        }
        let body = content.strip_prefix(prefix)?;

        let (name, args) = match body.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (body, ""),
        };

        let command = match name.to_lowercase().as_str() {
            "user" => required(args, "query").map(Self::User),
            "member" => required(args, "query").map(Self::Member),
            "role" => required(args, "query").map(Self::Role),
            "guild" | "server" => required(args, "query").map(Self::Guild),
            "emoji" => required(args, "query").map(Self::Emoji),
            "message" => required(args, "query").map(Self::Message),
            "channel" => parse_channel(args),
            "audit" => parse_audit(args),
            "ban" => parse_ban(args),
            "help" => Ok(Self::Help),
            _ => return None,
        };

        Some(command)
    }

    /// Name used in logs and guild-only errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Member(_) => "member",
            Self::Role(_) => "role",
            Self::Channel { .. } => "channel",
            Self::Guild(_) => "guild",
            Self::Emoji(_) => "emoji",
            Self::Message(_) => "message",
            Self::Audit { .. } => "audit",
            Self::Ban { .. } => "ban",
            Self::Help => "help",
        }
    }
}

fn required(args: &str, name: &'static str) -> CommandResult<String> {
    if args.is_empty() {
        Err(CommandError::MissingArgument { name })
    } else {
        Ok(args.to_string())
    }
}

/// `<query> [kind]`: a trailing word naming a channel kind is the filter,
/// unless it is the whole query.
fn parse_channel(args: &str) -> CommandResult<Command> {
    let args = required(args, "query")?;

    if let Some((query, last)) = args.rsplit_once(char::is_whitespace) {
        if let Ok(kind) = last.parse::<ChannelKind>() {
            return Ok(Command::Channel {
                query: query.trim_end().to_string(),
                kind: Some(kind),
            });
        }
    }

    Ok(Command::Channel {
        query: args,
        kind: None,
    })
}

fn parse_audit(args: &str) -> CommandResult<Command> {
    let mut parts = args.splitn(3, char::is_whitespace);
    let action = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or(CommandError::MissingArgument { name: "action" })?;
    let position = parts
        .next()
        .ok_or(CommandError::MissingArgument { name: "first|last" })?;
    let executor = required(parts.next().unwrap_or("").trim(), "executor")?;

    Ok(Command::Audit {
        action: AuditAction(parse_audit_action(action)?),
        position: position.parse()?,
        executor,
    })
}

fn parse_ban(args: &str) -> CommandResult<Command> {
    let (position, query) = args
        .split_once(char::is_whitespace)
        .ok_or(CommandError::MissingArgument { name: "query" })?;

    Ok(Command::Ban {
        position: position.parse()?,
        query: required(query.trim(), "query")?,
    })
}

/// Map an audit-log action name to the action it filters on.
pub fn parse_audit_action(name: &str) -> Result<Action, ParseKindError> {
    let action = match name.to_lowercase().replace('-', "_").as_str() {
        "kick" => Action::Member(MemberAction::Kick),
        "prune" => Action::Member(MemberAction::Prune),
        "ban" => Action::Member(MemberAction::BanAdd),
        "unban" => Action::Member(MemberAction::BanRemove),
        "member_update" => Action::Member(MemberAction::Update),
        "member_role_update" => Action::Member(MemberAction::RoleUpdate),
        "member_move" => Action::Member(MemberAction::MemberMove),
        "member_disconnect" => Action::Member(MemberAction::MemberDisconnect),
        "bot_add" => Action::Member(MemberAction::BotAdd),
        "role_create" => Action::Role(RoleAction::Create),
        "role_update" => Action::Role(RoleAction::Update),
        "role_delete" => Action::Role(RoleAction::Delete),
        "channel_create" => Action::Channel(ChannelAction::Create),
        "channel_update" => Action::Channel(ChannelAction::Update),
        "channel_delete" => Action::Channel(ChannelAction::Delete),
        "emoji_create" => Action::Emoji(EmojiAction::Create),
        "emoji_update" => Action::Emoji(EmojiAction::Update),
        "emoji_delete" => Action::Emoji(EmojiAction::Delete),
        "message_delete" => Action::Message(MessageAction::Delete),
        "message_bulk_delete" => Action::Message(MessageAction::BulkDelete),
        "message_pin" => Action::Message(MessageAction::Pin),
        "message_unpin" => Action::Message(MessageAction::Unpin),
        _ => {
            return Err(ParseKindError {
                what: "audit-log action",
                value: name.to_string(),
            })
        }
    };
    Ok(action)
}

fn not_found(what: &str, query: &str) -> String {
    format!("No {} matches `{}`.", what, query)
}

fn describe_user<U: UserEntity>(user: &U) -> String {
    format!("User **{}** (id {})", user.tag(), user.id())
}

fn describe_member<M: MemberEntity>(member: &M) -> String {
    format!(
        "Member **{}** ({}, id {})",
        member.display_name(),
        member.tag(),
        member.id()
    )
}

fn describe_role<R: RoleEntity>(role: &R) -> String {
    format!("Role **{}** (id {})", role.name(), role.id())
}

fn describe_channel<C: ChannelEntity>(channel: &C) -> String {
    format!(
        "Channel **#{}** ({}, id {})",
        channel.name(),
        channel.kind(),
        channel.id()
    )
}

fn describe_guild<G: GuildEntity>(guild: &G) -> String {
    format!("Server **{}** (id {})", guild.name(), guild.id())
}

fn describe_emoji<E: EmojiEntity>(emoji: &E) -> String {
    format!("Emoji **:{}:** (id {})", emoji.name(), emoji.id())
}

fn describe_message<M: MessageEntity>(message: &M) -> String {
    let content = message.content();
    let excerpt: String = content.chars().take(EXCERPT_LENGTH).collect();
    let ellipsis = if excerpt.len() < content.len() { "…" } else { "" };
    format!("Message {}: \"{}{}\"", message.id(), excerpt, ellipsis)
}

fn describe_ban<B: BanEntity>(ban: &B) -> String {
    format!(
        "Ban of user {} (reason: {})",
        ban.user_id(),
        ban.reason().unwrap_or("none given")
    )
}

fn describe_audit_entry<A: AuditLogEntity>(entry: &A, action: &str) -> String {
    format!(
        "Audit-log entry `{}` by user {}",
        action,
        entry.executor_id().as_deref().unwrap_or("unknown")
    )
}

/// Command handler for Discord bot.
pub struct CommandHandler {
    prefix: String,
    options: FetchOptions,
    message_limit: u8,
}

impl CommandHandler {
    pub fn new(prefix: String, fetch: &FetchConfig) -> Self {
        Self {
            prefix,
            options: fetch.options(),
            message_limit: fetch.message_limit,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parse and execute a command from Discord.
    ///
    /// Returns the reply text, or `None` if the message was not a command.
    pub async fn handle_command(
        &self,
        ctx: &Context,
        msg: &Message,
        content: &str,
    ) -> CommandResult<Option<String>> {
        let command = match Command::parse(content, &self.prefix) {
            Some(command) => command?,
            None => return Ok(None),
        };

        debug!("Processing command: {:?}", command);
        info!("{}{} command from {}", self.prefix, command.name(), msg.author.name);

        let client = SerenityClient::from_context(ctx);
        self.execute(&client, msg, command).await.map(Some)
    }

    async fn execute(
        &self,
        client: &SerenityClient,
        msg: &Message,
        command: Command,
    ) -> CommandResult<String> {
        let guild_only = || CommandError::GuildOnly {
            command: command.name(),
        };

        let reply = match &command {
            Command::Help => HELP_TEXT.replace("{p}", &self.prefix),

            Command::User(query) => {
                let users = UserResolver::new(client.clone());
                let user = match users.get(query) {
                    Some(user) => Some(user),
                    None => {
                        let id = Query::new(query).without_mention(Mention::User);
                        users.fetch(&id, self.options).await?
                    }
                };
                user.map_or_else(|| not_found("user", query), |u| describe_user(&u))
            }

            Command::Member(query) => {
                let guild = client.guild(msg.guild_id.ok_or_else(guild_only)?);
                let resolver = GuildMemberResolver::new();
                let member = match resolver.get(query, &guild) {
                    Some(member) => Some(member),
                    None => {
                        let id = Query::new(query).without_mention(Mention::User);
                        resolver.fetch(&guild, &id, self.options).await?
                    }
                };
                member.map_or_else(|| not_found("member", query), |m| describe_member(&m))
            }

            Command::Role(query) => {
                let guild = client.guild(msg.guild_id.ok_or_else(guild_only)?);
                let resolver = RoleResolver::new();
                let role = match resolver.get(query, &guild) {
                    Some(role) => Some(role),
                    None => {
                        let id = Query::new(query).without_mention(Mention::Role);
                        resolver.fetch(&guild, &id, self.options).await?
                    }
                };
                role.map_or_else(|| not_found("role", query), |r| describe_role(&r))
            }

            Command::Channel { query, kind } => {
                let guild = client.guild(msg.guild_id.ok_or_else(guild_only)?);
                let resolver = ChannelResolver::new();
                let channel = match resolver.get(query, &guild, *kind) {
                    Some(channel) => Some(channel),
                    None => {
                        let id = Query::new(query).without_mention(Mention::Channel);
                        resolver
                            .fetch(&guild, &id, self.options)
                            .await?
                            .filter(|channel| kind.map_or(true, |kind| channel.kind() == kind))
                    }
                };
                channel.map_or_else(|| not_found("channel", query), |c| describe_channel(&c))
            }

            Command::Guild(query) => {
                let resolver = GuildResolver::new(client.clone());
                let guild = match resolver.get(query) {
                    Some(guild) => Some(guild),
                    None => resolver.fetch(query, self.options).await?,
                };
                guild.map_or_else(|| not_found("server", query), |g| describe_guild(&g))
            }

            Command::Emoji(query) => {
                let guild = client.guild(msg.guild_id.ok_or_else(guild_only)?);
                let resolver = EmojiResolver::new();
                let emoji = match resolver.get(query, &guild) {
                    Some(emoji) => Some(emoji),
                    None => resolver.fetch(&guild, query, self.options).await?,
                };
                emoji.map_or_else(|| not_found("emoji", query), |e| describe_emoji(&e))
            }

            Command::Message(query) => {
                let channel = client.channel(msg.channel_id);
                let resolver = MessageResolver::new();
                let found = match resolver.get(query, &channel) {
                    Some(message) => Some(message),
                    None => {
                        let window = MessageFetchOptions::default()
                            .limit(self.message_limit)
                            .before(msg.id.to_string());
                        resolver.fetch_matching(query, &channel, &window).await?
                    }
                };
                found.map_or_else(|| not_found("message", query), |m| describe_message(&m))
            }

            Command::Audit {
                action,
                position,
                executor,
            } => {
                let guild = client.guild(msg.guild_id.ok_or_else(guild_only)?);
                let resolver = AuditLogResolver::new(UserResolver::new(client.clone()));
                let entry = resolver.get(executor, action.clone(), *position, &guild).await?;
                let action_name = format!("{:?}", action.0);
                entry.map_or_else(
                    || not_found("audit-log entry by", executor),
                    |e| describe_audit_entry(&e, &action_name),
                )
            }

            Command::Ban { position, query } => {
                let guild = client.guild(msg.guild_id.ok_or_else(guild_only)?);
                let resolver = BanResolver::new(UserResolver::new(client.clone()));
                let ban = resolver.get(query, *position, &guild).await?;
                ban.map_or_else(|| not_found("ban for", query), |b| describe_ban(&b))
            }
        };

        Ok(reply)
    }
}
