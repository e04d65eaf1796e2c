//! Custom emoji lookup by name, id, `<:name:id>` or `:name:`.

use crate::model::{EmojiEntity, FetchOptions, GuildScope};
use crate::resolve::matcher::{EntityMatcher, Query};

fn emoji_matcher<'a, E: EmojiEntity>(query: &'a Query<'a>) -> EntityMatcher<'a, E> {
    let raw = query.raw();
    EntityMatcher::new()
        .or(move |emoji: &E| query.eq_ignore_case(emoji.name()))
        .or(move |emoji: &E| emoji.id() == raw)
        .or(move |emoji: &E| format!("<:{}:{}>", emoji.name(), emoji.id()) == raw)
        .or(move |emoji: &E| format!(":{}:", emoji.name()) == raw)
}

/// Resolves custom emojis of a guild.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiResolver;

impl EmojiResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn get<G: GuildScope>(&self, query: &str, guild: &G) -> Option<G::Emoji> {
        let query = Query::new(query);
        let matcher = emoji_matcher(&query);
        matcher.find(guild.cached_emojis())
    }

    pub async fn fetch<G: GuildScope>(
        &self,
        guild: &G,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<G::Emoji>, G::Error> {
        guild.fetch_emoji(id, options).await
    }
}
