//! Guild member lookup by mention, id, display name, tag or username.

use crate::model::{FetchOptions, GuildScope, MemberEntity};
use crate::resolve::matcher::{EntityMatcher, Mention, Query};

fn member_matcher<'a, M: MemberEntity>(query: &'a Query<'a>) -> EntityMatcher<'a, M> {
    let id = query.without_mention(Mention::User);
    EntityMatcher::new()
        .or(move |member: &M| member.id() == *id)
        .or(move |member: &M| query.eq_ignore_case(member.display_name()))
        .or(move |member: &M| query.eq_ignore_case(&member.tag()))
        .or(move |member: &M| query.eq_ignore_case(member.username()))
}

/// Resolves members of a guild.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuildMemberResolver;

impl GuildMemberResolver {
    pub fn new() -> Self {
        Self
    }

    /// Find a cached member of `guild`.
    pub fn get<G: GuildScope>(&self, query: &str, guild: &G) -> Option<G::Member> {
        let query = Query::new(query);
        let matcher = member_matcher(&query);
        matcher.find(guild.cached_members())
    }

    /// Fetch a member of `guild` by user id.
    pub async fn fetch<G: GuildScope>(
        &self,
        guild: &G,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<G::Member>, G::Error> {
        guild.fetch_member(id, options).await
    }
}
