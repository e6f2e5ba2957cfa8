//! Scrubbers: text-to-text rules applied to snapshot content
//!
//! A scrubber sees the output of the previous one, so order matters: running
//! [`Scrubber::dates`] before [`Scrubber::timestamps`] turns
//! `2024-01-15 10:30:00` into `<DATE> 10:30:00`.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::error::Result;

/// Caller-supplied scrub function
pub type ScrubFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Placeholder written by [`Scrubber::uuids`]
pub const UUID_PLACEHOLDER: &str = "<UUID>";
/// Placeholder written by [`Scrubber::emails`]
pub const EMAIL_PLACEHOLDER: &str = "<EMAIL>";
/// Placeholder written by [`Scrubber::timestamps`]
pub const TIMESTAMP_PLACEHOLDER: &str = "<TIMESTAMP>";
/// Placeholder written by [`Scrubber::dates`]
pub const DATE_PLACEHOLDER: &str = "<DATE>";
/// Placeholder written by [`Scrubber::ip_addresses`]
pub const IP_PLACEHOLDER: &str = "<IP>";
/// Placeholder written by [`Scrubber::jwts`]
pub const JWT_PLACEHOLDER: &str = "<JWT>";
/// Placeholder written by [`Scrubber::credit_cards`]
pub const CREDIT_CARD_PLACEHOLDER: &str = "<CREDIT_CARD>";
/// Placeholder written by [`Scrubber::unix_timestamps`]
pub const UNIX_TIMESTAMP_PLACEHOLDER: &str = "<UNIX_TIMESTAMP>";
/// Placeholder written by [`Scrubber::api_keys`]
pub const API_KEY_PLACEHOLDER: &str = "<API_KEY>";

fn builtin(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in scrub pattern compiles")
}

static UUID: LazyLock<Regex> = LazyLock::new(|| {
    builtin(r"(?i)\b[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\b")
});
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| builtin(r"\b[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}\b"));
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    builtin(r"\b\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+\-]\d{2}:?\d{2})?")
});
static DATE: LazyLock<Regex> =
    LazyLock::new(|| builtin(r"\b(?:\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}/\d{4})\b"));
static IPV4: LazyLock<Regex> = LazyLock::new(|| builtin(r"\b(?:\d{1,3}\.){3}\d{1,3}\b"));
static JWT: LazyLock<Regex> =
    LazyLock::new(|| builtin(r"\beyJ[A-Za-z0-9_\-]+\.[A-Za-z0-9_\-]+\.[A-Za-z0-9_\-]+"));
static CREDIT_CARD: LazyLock<Regex> =
    LazyLock::new(|| builtin(r"\b\d{4}[\- ]?\d{4}[\- ]?\d{4}[\- ]?\d{4}\b"));
static UNIX_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| builtin(r"\b\d{10}(?:\d{3})?\b"));
static API_KEY: LazyLock<Regex> =
    LazyLock::new(|| builtin(r"\b(?:sk|pk|rk)_(?:live|test)_[A-Za-z0-9]+\b"));

/// A text-to-text content rule
#[derive(Clone)]
pub enum Scrubber {
    /// Replace every occurrence of a literal substring
    Exact {
        /// Text to find
        needle: String,
        /// Replacement text
        replacement: String,
    },
    /// Replace every regex match; `$1`/`${name}` in the replacement expand to captures
    Regex {
        /// Compiled pattern
        pattern: Regex,
        /// Replacement template
        replacement: String,
    },
    /// Arbitrary caller-supplied transform
    Custom(ScrubFn),
}

impl fmt::Debug for Scrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact {
                needle,
                replacement,
            } => f
                .debug_struct("Exact")
                .field("needle", needle)
                .field("replacement", replacement)
                .finish(),
            Self::Regex {
                pattern,
                replacement,
            } => f
                .debug_struct("Regex")
                .field("pattern", &pattern.as_str())
                .field("replacement", replacement)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Scrubber {
    /// Replace a literal substring
    #[must_use]
    pub fn exact(needle: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::Exact {
            needle: needle.into(),
            replacement: replacement.into(),
        }
    }

    /// Replace regex matches, expanding capture references in `replacement`
    pub fn regex(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self::Regex {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// Wrap a caller-supplied transform
    #[must_use]
    pub fn custom(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Apply this rule to `text`
    #[must_use]
    pub fn scrub(&self, text: &str) -> String {
        match self {
            Self::Exact {
                needle,
                replacement,
            } => {
                if needle.is_empty() {
                    text.to_string()
                } else {
                    text.replace(needle.as_str(), replacement)
                }
            },
            Self::Regex {
                pattern,
                replacement,
            } => pattern.replace_all(text, replacement.as_str()).into_owned(),
            Self::Custom(f) => f(text),
        }
    }

    fn builtin(pattern: &Regex, placeholder: &str) -> Self {
        Self::Regex {
            pattern: pattern.clone(),
            replacement: placeholder.to_string(),
        }
    }

    /// Replace UUIDs (any version, either case) with `<UUID>`
    #[must_use]
    pub fn uuids() -> Self {
        Self::builtin(&UUID, UUID_PLACEHOLDER)
    }

    /// Replace email addresses with `<EMAIL>`
    #[must_use]
    pub fn emails() -> Self {
        Self::builtin(&EMAIL, EMAIL_PLACEHOLDER)
    }

    /// Replace ISO 8601 / RFC 3339 timestamps with `<TIMESTAMP>`
    #[must_use]
    pub fn timestamps() -> Self {
        Self::builtin(&TIMESTAMP, TIMESTAMP_PLACEHOLDER)
    }

    /// Replace `YYYY-MM-DD` and `MM/DD/YYYY` dates with `<DATE>`
    #[must_use]
    pub fn dates() -> Self {
        Self::builtin(&DATE, DATE_PLACEHOLDER)
    }

    /// Replace dotted IPv4 addresses with `<IP>`
    #[must_use]
    pub fn ip_addresses() -> Self {
        Self::builtin(&IPV4, IP_PLACEHOLDER)
    }

    /// Replace JSON Web Tokens with `<JWT>`
    #[must_use]
    pub fn jwts() -> Self {
        Self::builtin(&JWT, JWT_PLACEHOLDER)
    }

    /// Replace 16-digit card numbers (optionally grouped by `-` or space) with `<CREDIT_CARD>`
    #[must_use]
    pub fn credit_cards() -> Self {
        Self::builtin(&CREDIT_CARD, CREDIT_CARD_PLACEHOLDER)
    }

    /// Replace 10-digit (seconds) and 13-digit (milliseconds) epoch values with `<UNIX_TIMESTAMP>`
    #[must_use]
    pub fn unix_timestamps() -> Self {
        Self::builtin(&UNIX_TIMESTAMP, UNIX_TIMESTAMP_PLACEHOLDER)
    }

    /// Replace `sk_live_…`-style API keys with `<API_KEY>`
    #[must_use]
    pub fn api_keys() -> Self {
        Self::builtin(&API_KEY, API_KEY_PLACEHOLDER)
    }
}
