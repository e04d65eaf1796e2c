//! Audit-log entry lookup by action type and executor.

use crate::model::{AuditLogEntity, EntryPosition, GuildScope, UserEntity};
use crate::resolve::user::ResolveUser;

/// Finds the first or last audit-log entry of a given action performed by
/// the user a query resolves to.
#[derive(Debug, Clone)]
pub struct AuditLogResolver<R> {
    users: R,
}

impl<R: ResolveUser> AuditLogResolver<R> {
    pub fn new(users: R) -> Self {
        Self { users }
    }

    /// The executor is resolved from the cache only. An unknown executor
    /// still costs one request and yields `None`.
    pub async fn get<G: GuildScope>(
        &self,
        executor: &str,
        action: <G::AuditLogEntry as AuditLogEntity>::Action,
        position: EntryPosition,
        guild: &G,
    ) -> Result<Option<G::AuditLogEntry>, G::Error> {
        let executor_id = self.users.resolve_user(executor).map(|user| user.id());

        let entries = guild.fetch_audit_logs(&action).await?;

        // The request filters by action only.
        let matching: Vec<_> = entries
            .into_iter()
            .filter(|entry| entry.action() == action)
            .filter(|entry| match (&executor_id, entry.executor_id()) {
                (Some(wanted), Some(actual)) => *wanted == actual,
                _ => false,
            })
            .collect();

        Ok(position.select(matching))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::user::UserResolver;
    use crate::testing::{audit, user, FakeAction, FakeClient, FakeError, FakeGuild, FakeUser, Network};

    /// Resolves every query to the same user.
    struct FixedUser(Option<FakeUser>);

    impl ResolveUser for FixedUser {
        type User = FakeUser;

        fn resolve_user(&self, _query: &str) -> Option<FakeUser> {
            self.0.clone()
        }
    }

    fn guild() -> FakeGuild {
        FakeGuild {
            audit_log: vec![
                audit("1", FakeAction::Kick, Some("10")),
                audit("2", FakeAction::Kick, Some("20")),
                audit("3", FakeAction::Ban, Some("10")),
                audit("4", FakeAction::Kick, Some("10")),
                audit("5", FakeAction::Kick, None),
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_first_and_last_for_executor() {
        let guild = guild();
        let resolver = AuditLogResolver::new(FixedUser(Some(user("10", "warden", "1"))));

        let first = resolver
            .get("warden", FakeAction::Kick, EntryPosition::First, &guild)
            .await
            .unwrap();
        assert_eq!(first.unwrap().id, "1");

        let last = resolver
            .get("warden", FakeAction::Kick, EntryPosition::Last, &guild)
            .await
            .unwrap();
        assert_eq!(last.unwrap().id, "4");
    }

    #[tokio::test]
    async fn test_action_type_is_filtered() {
        let guild = guild();
        let resolver = AuditLogResolver::new(FixedUser(Some(user("10", "warden", "1"))));

        let entry = resolver
            .get("warden", FakeAction::Ban, EntryPosition::Last, &guild)
            .await
            .unwrap();
        assert_eq!(entry.unwrap().id, "3");

        let none = resolver
            .get("warden", FakeAction::RoleUpdate, EntryPosition::First, &guild)
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_action_rechecked_on_unfiltered_response() {
        let guild = FakeGuild {
            ignores_action_filter: true,
            ..guild()
        };
        let resolver = AuditLogResolver::new(FixedUser(Some(user("10", "warden", "1"))));

        let first_ban = resolver
            .get("warden", FakeAction::Ban, EntryPosition::First, &guild)
            .await
            .unwrap();
        assert_eq!(first_ban.unwrap().id, "3");

        let last_ban = resolver
            .get("warden", FakeAction::Ban, EntryPosition::Last, &guild)
            .await
            .unwrap();
        assert_eq!(last_ban.unwrap().id, "3");

        let role_update = resolver
            .get("warden", FakeAction::RoleUpdate, EntryPosition::First, &guild)
            .await
            .unwrap();
        assert!(role_update.is_none());
    }

    #[tokio::test]
    async fn test_unknown_executor_yields_nothing_after_one_request() {
        let guild = guild();
        let resolver = AuditLogResolver::new(FixedUser(None));

        let entry = resolver
            .get("ghost", FakeAction::Kick, EntryPosition::First, &guild)
            .await
            .unwrap();
        // Entry 5 has no executor either, but a miss never matches.
        assert!(entry.is_none());
        assert_eq!(guild.network.calls(), 1);
    }

    #[tokio::test]
    async fn test_with_cache_backed_user_resolver() {
        let guild = guild();
        let users = UserResolver::new(FakeClient::with_users(vec![
            user("10", "warden", "0001"),
            user("20", "keeper", "0002"),
        ]));
        let resolver = AuditLogResolver::new(users);

        let entry = resolver
            .get("<@20>", FakeAction::Kick, EntryPosition::First, &guild)
            .await
            .unwrap();
        assert_eq!(entry.unwrap().id, "2");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let guild = FakeGuild {
            network: Network::failing(FakeError("missing permissions")),
            ..guild()
        };
        let resolver = AuditLogResolver::new(FixedUser(Some(user("10", "warden", "1"))));

        let result = resolver
            .get("warden", FakeAction::Kick, EntryPosition::First, &guild)
            .await;
        assert_eq!(result, Err(FakeError("missing permissions")));
        assert_eq!(guild.network.calls(), 1);
    }
}
