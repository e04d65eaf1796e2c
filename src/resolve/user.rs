//! User lookup by mention, id, tag or username.

use crate::model::{FetchOptions, UserEntity, UserSource};
use crate::resolve::matcher::{EntityMatcher, Mention, Query};

/// Cache-only user resolution, injectable into the audit-log and ban
/// resolvers.
pub trait ResolveUser: Send + Sync {
    type User: UserEntity + Send;

    fn resolve_user(&self, query: &str) -> Option<Self::User>;
}

pub(crate) fn user_matcher<'a, U: UserEntity>(query: &'a Query<'a>) -> EntityMatcher<'a, U> {
    let id = query.without_mention(Mention::User);
    EntityMatcher::new()
        .or(move |user: &U| user.id() == *id)
        .or(move |user: &U| query.eq_ignore_case(&user.tag()))
        .or(move |user: &U| query.eq_ignore_case(user.username()))
}

/// Resolves users against the client-wide user cache.
#[derive(Debug, Clone)]
pub struct UserResolver<S> {
    source: S,
}

impl<S: UserSource> UserResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Find a cached user by mention, id, tag or username.
    pub fn get(&self, query: &str) -> Option<S::User> {
        let query = Query::new(query);
        let matcher = user_matcher(&query);
        matcher.find(self.source.cached_users())
    }

    /// Fetch a user by id through the client.
    pub async fn fetch(&self, id: &str, options: FetchOptions) -> Result<Option<S::User>, S::Error> {
        self.source.fetch_user(id, options).await
    }
}

impl<S: UserSource> ResolveUser for UserResolver<S> {
    type User = S::User;

    fn resolve_user(&self, query: &str) -> Option<S::User> {
        self.get(query)
    }
}
