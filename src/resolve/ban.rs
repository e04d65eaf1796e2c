//! Ban lookup by banned user.

use crate::model::{BanEntity, EntryPosition, GuildScope, UserEntity};
use crate::resolve::user::ResolveUser;

/// Finds the first or last ban of the user a query resolves to.
#[derive(Debug, Clone)]
pub struct BanResolver<R> {
    users: R,
}

impl<R: ResolveUser> BanResolver<R> {
    pub fn new(users: R) -> Self {
        Self { users }
    }

    pub async fn get<G: GuildScope>(
        &self,
        query: &str,
        position: EntryPosition,
        guild: &G,
    ) -> Result<Option<G::Ban>, G::Error> {
        let user_id = self.users.resolve_user(query).map(|user| user.id());

        let bans = guild.fetch_bans().await?;

        let matching: Vec<_> = bans
            .into_iter()
            .filter(|ban| user_id.as_deref() == Some(ban.user_id().as_str()))
            .collect();

        Ok(position.select(matching))
    }
}
