//! Ignore rules: key/value predicates for structured content
//!
//! Ignore rules only apply when content is transformed as JSON. For every
//! object entry the rule sees the key and a string form of the value: the raw
//! text for string values, compact JSON for everything else (so `null`,
//! `42`, `true`, `[1,2]`).

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::Result;

/// Caller-supplied ignore predicate over `(key, value)`
pub type IgnoreFn = Arc<dyn Fn(&str, &str) -> bool + Send + Sync>;

/// Marker written in place of a redacted value
pub const REDACTED: &str = "<IGNORED>";

/// Key names treated as sensitive by [`IgnoreRule::sensitive_keys`]
pub const SENSITIVE_KEYS: &[&str] = &[
    "password",
    "secret",
    "token",
    "api_key",
    "apiKey",
    "access_token",
    "refresh_token",
    "private_key",
    "privateKey",
    "authorization",
    "auth",
    "credentials",
    "passwd",
];

/// What happens to a matching entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IgnoreAction {
    /// Keep the key, replace the value with [`REDACTED`]
    #[default]
    Redact,
    /// Drop the entry entirely
    Omit,
}

/// The predicate part of an ignore rule
#[derive(Clone)]
pub enum IgnoreMatcher {
    /// Exact key and value; a value of `"*"` matches any value
    KeyValue {
        /// Key to match
        key: String,
        /// Value to match, or `"*"`
        value: String,
    },
    /// Any of a fixed set of keys, whatever the value
    Keys(Vec<String>),
    /// Keys matching a regex
    KeysMatching(Regex),
    /// Key and/or value regexes; a missing side matches anything
    Pattern {
        /// Regex the key must match
        key: Option<Regex>,
        /// Regex the value must match
        value: Option<Regex>,
    },
    /// Any of a fixed set of values, whatever the key
    Values(Vec<String>),
    /// Arbitrary caller-supplied predicate
    Custom(IgnoreFn),
}

impl fmt::Debug for IgnoreMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyValue { key, value } => {
                f.debug_struct("KeyValue").field("key", key).field("value", value).finish()
            },
            Self::Keys(keys) => f.debug_tuple("Keys").field(keys).finish(),
            Self::KeysMatching(re) => f.debug_tuple("KeysMatching").field(&re.as_str()).finish(),
            Self::Pattern { key, value } => f
                .debug_struct("Pattern")
                .field("key", &key.as_ref().map(Regex::as_str))
                .field("value", &value.as_ref().map(Regex::as_str))
                .finish(),
            Self::Values(values) => f.debug_tuple("Values").field(values).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl IgnoreMatcher {
    fn matches(&self, key: &str, value: &str) -> bool {
        match self {
            Self::KeyValue { key: k, value: v } => k == key && (v == "*" || v == value),
            Self::Keys(keys) => keys.iter().any(|k| k == key),
            Self::KeysMatching(re) => re.is_match(key),
            Self::Pattern { key: k, value: v } => {
                k.as_ref().is_none_or(|re| re.is_match(key))
                    && v.as_ref().is_none_or(|re| re.is_match(value))
            },
            Self::Values(values) => values.iter().any(|v| v == value),
            Self::Custom(f) => f(key, value),
        }
    }
}

/// A structured-content rule: a matcher plus what to do on a match
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    matcher: IgnoreMatcher,
    action: IgnoreAction,
}

impl IgnoreRule {
    /// Build a redacting rule from a matcher
    #[must_use]
    pub fn new(matcher: IgnoreMatcher) -> Self {
        Self {
            matcher,
            action: IgnoreAction::Redact,
        }
    }

    /// Drop matching entries instead of redacting them
    #[must_use]
    pub fn omit(mut self) -> Self {
        self.action = IgnoreAction::Omit;
        self
    }

    /// The action taken on a match
    #[must_use]
    pub const fn action(&self) -> IgnoreAction {
        self.action
    }

    /// The predicate
    #[must_use]
    pub const fn matcher(&self) -> &IgnoreMatcher {
        &self.matcher
    }

    /// Whether the entry `key: value` should be ignored
    #[must_use]
    pub fn should_ignore(&self, key: &str, value: &str) -> bool {
        self.matcher.matches(key, value)
    }

    /// Exact key and value; pass `"*"` as the value to match any value
    #[must_use]
    pub fn key_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(IgnoreMatcher::KeyValue {
            key: key.into(),
            value: value.into(),
        })
    }

    /// Any of the given keys
    #[must_use]
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(IgnoreMatcher::Keys(keys.into_iter().map(Into::into).collect()))
    }

    /// Keys matching a regex
    pub fn keys_matching(pattern: &str) -> Result<Self> {
        Ok(Self::new(IgnoreMatcher::KeysMatching(Regex::new(pattern)?)))
    }

    /// Key and value regexes; an empty pattern matches anything
    pub fn pattern(key_pattern: &str, value_pattern: &str) -> Result<Self> {
        let compile = |p: &str| -> Result<Option<Regex>> {
            if p.is_empty() { Ok(None) } else { Ok(Some(Regex::new(p)?)) }
        };
        Ok(Self::new(IgnoreMatcher::Pattern {
            key: compile(key_pattern)?,
            value: compile(value_pattern)?,
        }))
    }

    /// Any of the given values, whatever the key
    #[must_use]
    pub fn values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(IgnoreMatcher::Values(values.into_iter().map(Into::into).collect()))
    }

    /// Wrap a caller-supplied predicate
    #[must_use]
    pub fn custom(f: impl Fn(&str, &str) -> bool + Send + Sync + 'static) -> Self {
        Self::new(IgnoreMatcher::Custom(Arc::new(f)))
    }

    /// Common credential-bearing keys ([`SENSITIVE_KEYS`])
    #[must_use]
    pub fn sensitive_keys() -> Self {
        Self::keys(SENSITIVE_KEYS.iter().copied())
    }

    /// Values that are empty or whitespace-only
    #[must_use]
    pub fn empty_values() -> Self {
        Self::custom(|_, value| value.trim().is_empty())
    }

    /// `null` values
    #[must_use]
    pub fn null_values() -> Self {
        Self::values(["null"])
    }
}
