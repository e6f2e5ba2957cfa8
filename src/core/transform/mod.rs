//! Content transform pipeline
//!
//! Normalizes volatile or sensitive data before content becomes a snapshot.
//!
//! - Plain text: every [`Scrubber`] runs in order over the raw text.
//! - JSON: the content is parsed, [`IgnoreRule`]s redact or omit entries,
//!   the tree is printed canonically, then the scrubbers run over that text.
//!
//! The pipeline knows nothing about individual rules; the built-in catalog
//! (`Scrubber::uuids`, `IgnoreRule::sensitive_keys`, ...) is just prebuilt values.

pub mod ignore;
pub mod json;
pub mod scrub;

pub use ignore::{IgnoreAction, IgnoreMatcher, IgnoreRule, REDACTED};
pub use scrub::Scrubber;

use crate::error::Result;

/// How content should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentMode {
    /// Opaque text
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Apply ordered scrubbers (and, for JSON, ignore rules) to `content`
///
/// Only JSON mode can fail, and only when `content` does not parse.
pub fn apply(
    content: &str,
    scrubbers: &[Scrubber],
    ignores: &[IgnoreRule],
    mode: ContentMode,
) -> Result<String> {
    match mode {
        ContentMode::Text => {
            if !ignores.is_empty() {
                log::debug!("{} ignore rule(s) skipped for plain-text content", ignores.len());
            }
            Ok(scrub_all(content, scrubbers))
        },
        ContentMode::Json => {
            let canonical = json::normalize_json(content, ignores)?;
            Ok(scrub_all(&canonical, scrubbers))
        },
    }
}

fn scrub_all(content: &str, scrubbers: &[Scrubber]) -> String {
    scrubbers
        .iter()
        .fold(content.to_string(), |text, scrubber| scrubber.scrub(&text))
}

/// An ordered set of rules supplied at capture time
///
/// ```
/// use shutter::core::transform::{IgnoreRule, Scrubber, Transform};
///
/// let transform = Transform::new()
///     .scrub(Scrubber::emails())
///     .ignore(IgnoreRule::sensitive_keys());
///
/// let out = transform.apply_json(r#"{"password":"x","email":"a@b.com"}"#).unwrap();
/// assert_eq!(out, "{\n  \"email\": \"<EMAIL>\",\n  \"password\": \"<IGNORED>\"\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Transform {
    scrubbers: Vec<Scrubber>,
    ignores: Vec<IgnoreRule>,
}

impl Transform {
    /// No rules: content passes through unchanged (JSON is still canonicalized)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scrubber
    #[must_use]
    pub fn scrub(mut self, scrubber: Scrubber) -> Self {
        self.scrubbers.push(scrubber);
        self
    }

    /// Append an ignore rule
    #[must_use]
    pub fn ignore(mut self, rule: IgnoreRule) -> Self {
        self.ignores.push(rule);
        self
    }

    /// Scrubbers in application order
    #[must_use]
    pub fn scrubbers(&self) -> &[Scrubber] {
        &self.scrubbers
    }

    /// Ignore rules in evaluation order
    #[must_use]
    pub fn ignores(&self) -> &[IgnoreRule] {
        &self.ignores
    }

    /// Transform plain-text content
    #[must_use]
    pub fn apply_text(&self, content: &str) -> String {
        scrub_all(content, &self.scrubbers)
    }

    /// Transform JSON content
    pub fn apply_json(&self, content: &str) -> Result<String> {
        apply(content, &self.scrubbers, &self.ignores, ContentMode::Json)
    }

    /// Transform content in the given mode
    pub fn apply(&self, content: &str, mode: ContentMode) -> Result<String> {
        apply(content, &self.scrubbers, &self.ignores, mode)
    }
}
