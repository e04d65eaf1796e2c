//! Message lookup by content prefix, content suffix or id.

use crate::model::{ChannelScope, FetchOptions, MessageEntity, MessageFetchOptions};
use crate::resolve::matcher::{EntityMatcher, Query};

fn message_matcher<'a, M: MessageEntity>(query: &'a Query<'a>) -> EntityMatcher<'a, M> {
    let raw = query.raw();
    EntityMatcher::new()
        .or(move |message: &M| message.content().starts_with(raw))
        .or(move |message: &M| message.content().ends_with(raw))
        .or(move |message: &M| message.id() == raw)
}

/// Resolves messages of a text channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageResolver;

impl MessageResolver {
    pub fn new() -> Self {
        Self
    }

    /// Find a cached message whose content starts or ends with `query`, or
    /// whose id equals it. Content matching is case-sensitive.
    pub fn get<C: ChannelScope>(&self, query: &str, channel: &C) -> Option<C::Message> {
        let query = Query::new(query);
        let matcher = message_matcher(&query);
        matcher.find(channel.cached_messages())
    }

    pub async fn fetch<C: ChannelScope>(
        &self,
        channel: &C,
        id: &str,
        options: FetchOptions,
    ) -> Result<Option<C::Message>, C::Error> {
        channel.fetch_message(id, options).await
    }

    /// Fetch a window of channel history in one request.
    pub async fn fetch_many<C: ChannelScope>(
        &self,
        channel: &C,
        options: &MessageFetchOptions,
    ) -> Result<Vec<C::Message>, C::Error> {
        channel.fetch_messages(options).await
    }

    /// Fetch a window of history and return its first message matching
    /// `query` the same way [`MessageResolver::get`] does.
    pub async fn fetch_matching<C: ChannelScope>(
        &self,
        query: &str,
        channel: &C,
        options: &MessageFetchOptions,
    ) -> Result<Option<C::Message>, C::Error> {
        let messages = channel.fetch_messages(options).await?;
        let query = Query::new(query);
        let matcher = message_matcher(&query);
        Ok(matcher.find(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{message, FakeChannelScope, FakeError, Network};

    fn channel() -> FakeChannelScope {
        FakeChannelScope {
            messages: vec![
                message("900", "raid tonight at 8"),
                message("901", "who is bringing flasks"),
                message("902", "see you at 8"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_prefix_suffix_and_id() {
        let channel = channel();
        let resolver = MessageResolver::new();
        assert_eq!(resolver.get("who is", &channel).unwrap().id, "901");
        assert_eq!(resolver.get("flasks", &channel).unwrap().id, "901");
        assert_eq!(resolver.get("902", &channel).unwrap().content, "see you at 8");
    }

    #[test]
    fn test_first_match_in_iteration_order() {
        // Both 900 and 902 end with "at 8".
        let channel = channel();
        assert_eq!(MessageResolver::new().get("at 8", &channel).unwrap().id, "900");
    }

    #[test]
    fn test_content_prefix_beats_later_id_match() {
        let channel = FakeChannelScope {
            messages: vec![message("1", "42 is the answer"), message("42", "hello")],
            ..Default::default()
        };
        assert_eq!(MessageResolver::new().get("42", &channel).unwrap().id, "1");
    }

    #[test]
    fn test_content_match_is_case_sensitive() {
        let channel = channel();
        assert!(MessageResolver::new().get("RAID", &channel).is_none());
    }

    #[tokio::test]
    async fn test_fetch_by_id() {
        let channel = FakeChannelScope {
            history: vec![message("77", "old news")],
            ..channel()
        };
        let found = MessageResolver::new()
            .fetch(&channel, "77", FetchOptions::default())
            .await
            .unwrap();
        assert_eq!(found.unwrap().content, "old news");
        assert_eq!(channel.network.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_matching_searches_fetched_window() {
        let channel = FakeChannelScope {
            history: vec![
                message("1", "first"),
                message("2", "needle here"),
                message("3", "needle again"),
            ],
            ..Default::default()
        };
        let resolver = MessageResolver::new();

        let window = MessageFetchOptions::default().limit(2);
        assert_eq!(resolver.fetch_many(&channel, &window).await.unwrap().len(), 2);

        let found = resolver
            .fetch_matching("needle", &channel, &window)
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, "2");

        let outside = resolver
            .fetch_matching("again", &channel, &window)
            .await
            .unwrap();
        assert!(outside.is_none());
        assert_eq!(channel.network.calls(), 3);
    }

    #[tokio::test]
    async fn test_fetch_many_failure() {
        let channel = FakeChannelScope {
            network: Network::failing(FakeError("forbidden")),
            ..Default::default()
        };
        let result = MessageResolver::new()
            .fetch_many(&channel, &MessageFetchOptions::default())
            .await;
        assert_eq!(result, Err(FakeError("forbidden")));
    }
}
