//! Role lookup by name, mention or id.

use crate::model::{FetchOptions, GuildScope, RoleEntity};
use crate::resolve::matcher::{EntityMatcher, Mention, Query};

fn role_matcher<'a, R: RoleEntity>(query: &'a Query<'a>) -> EntityMatcher<'a, R> {
    let id = query.without_mention(Mention::Role);
    EntityMatcher::new()
        .or(move |role: &R| query.eq_ignore_case(role.name()))
        .or(move |role: &R| role.id() == *id)
}

/// Resolves roles of a guild.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleResolver;

impl RoleResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn get<G: GuildScope>(&self, query: &str, guild: &G) -> Option<G::Role> {
        let query = Query::new(query);
        let matcher = role_matcher(&query);
        matcher.find(guild.cached_roles())
    }

    pub async fn fetch<G: GuildScope>(
        &self,
        guild: &G,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<G::Role>, G::Error> {
        guild.fetch_role(id, options).await
    }
}
