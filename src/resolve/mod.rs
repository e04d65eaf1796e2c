//! Query resolvers, one per entity kind.
//!
//! Every cache lookup goes through [`matcher::EntityMatcher`]: the first
//! cached candidate satisfying any of the entity's predicates is returned.

pub mod audit_log;
pub mod ban;
pub mod channel;
pub mod emoji;
pub mod guild;
pub mod matcher;
pub mod member;
pub mod message;
pub mod role;
pub mod user;

pub use audit_log::AuditLogResolver;
pub use ban::BanResolver;
pub use channel::ChannelResolver;
pub use emoji::EmojiResolver;
pub use guild::GuildResolver;
pub use matcher::{EntityMatcher, Mention, Query};
pub use member::GuildMemberResolver;
pub use message::MessageResolver;
pub use role::RoleResolver;
pub use user::{ResolveUser, UserResolver};
