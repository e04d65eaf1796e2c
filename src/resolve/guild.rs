//! Guild lookup by name or id.

use crate::model::{FetchOptions, GuildEntity, GuildSource};
use crate::resolve::matcher::{EntityMatcher, Query};

fn guild_matcher<'a, G: GuildEntity>(query: &'a Query<'a>) -> EntityMatcher<'a, G> {
    // Guild ids are never mention-wrapped.
    EntityMatcher::new()
        .or(move |guild: &G| query.eq_ignore_case(guild.name()))
        .or(move |guild: &G| guild.id() == query.raw())
}

/// Resolves guilds the client is in.
#[derive(Debug, Clone)]
pub struct GuildResolver<S> {
    source: S,
}

impl<S: GuildSource> GuildResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn get(&self, query: &str) -> Option<S::Guild> {
        let query = Query::new(query);
        let matcher = guild_matcher(&query);
        matcher.find(self.source.cached_guilds())
    }

    pub async fn fetch(
        &self,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<S::Guild>, S::Error> {
        self.source.fetch_guild(id, options).await
    }
}
