//! First-match-wins predicate matching over cached candidates.

use std::borrow::Cow;
use std::sync::LazyLock;

use fancy_regex::Regex;

static USER_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\\<>@!]").expect("user mention pattern"));
static ROLE_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\\<>@&]").expect("role mention pattern"));
static CHANNEL_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\\<>#]").expect("channel mention pattern"));

/// Mention syntax an id may be wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mention {
    /// `<@id>` or `<@!id>`
    User,
    /// `<@&id>`
    Role,
    /// `<#id>`
    Channel,
}

impl Mention {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::User => &USER_MENTION,
            Self::Role => &ROLE_MENTION,
            Self::Channel => &CHANNEL_MENTION,
        }
    }
}

/// A raw query with its case-folded form.
#[derive(Debug, Clone)]
pub struct Query<'q> {
    raw: &'q str,
    folded: String,
}

impl<'q> Query<'q> {
    pub fn new(raw: &'q str) -> Self {
        Self {
            raw,
            folded: raw.to_lowercase(),
        }
    }

    pub fn raw(&self) -> &'q str {
        self.raw
    }

    /// Case-insensitive equality against the query.
    pub fn eq_ignore_case(&self, value: &str) -> bool {
        value.to_lowercase() == self.folded
    }

    /// The query with every mention punctuation character removed.
    pub fn without_mention(&self, mention: Mention) -> Cow<'q, str> {
        mention.pattern().replace_all(self.raw, "")
    }
}

type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// OR-combination of predicates; the first candidate satisfying any of them
/// wins. There is no ranking between candidates.
pub struct EntityMatcher<'a, T> {
    predicates: Vec<Predicate<'a, T>>,
}

impl<'a, T> EntityMatcher<'a, T> {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Add a predicate, evaluated after those already registered.
    pub fn or(mut self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn matches(&self, candidate: &T) -> bool {
        self.predicates.iter().any(|predicate| predicate(candidate))
    }

    /// First candidate, in iteration order, matching any predicate.
    pub fn find<I>(&self, candidates: I) -> Option<T>
    where
        I: IntoIterator<Item = T>,
    {
        candidates.into_iter().find(|candidate| self.matches(candidate))
    }
}

impl<T> Default for EntityMatcher<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}
