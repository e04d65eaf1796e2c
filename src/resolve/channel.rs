//! Channel lookup by mention, id or name, optionally restricted to one
//! channel kind.

use crate::model::{ChannelEntity, ChannelKind, FetchOptions, GuildScope};
use crate::resolve::matcher::{EntityMatcher, Mention, Query};

fn channel_matcher<'a, C: ChannelEntity>(query: &'a Query<'a>) -> EntityMatcher<'a, C> {
    let id = query.without_mention(Mention::Channel);
    EntityMatcher::new()
        .or(move |channel: &C| channel.id() == *id)
        .or(move |channel: &C| query.eq_ignore_case(channel.name()))
}

/// Resolves channels of a guild.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelResolver;

impl ChannelResolver {
    pub fn new() -> Self {
        Self
    }

    /// Find a cached channel of `guild`.
    ///
    /// With `kind` set, only channels of that kind are considered and a
    /// match of any other kind is discarded.
    pub fn get<G: GuildScope>(
        &self,
        query: &str,
        guild: &G,
        kind: Option<ChannelKind>,
    ) -> Option<G::Channel> {
        let query = Query::new(query);
        let matcher = channel_matcher(&query);

        match kind {
            Some(kind) => matcher
                .find(
                    guild
                        .cached_channels()
                        .into_iter()
                        .filter(|channel| channel.kind() == kind),
                )
                .filter(|channel| channel.kind() == kind),
            None => matcher.find(guild.cached_channels()),
        }
    }

    pub async fn fetch<G: GuildScope>(
        &self,
        guild: &G,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<G::Channel>, G::Error> {
        guild.fetch_channel(id, options).await
    }
}
