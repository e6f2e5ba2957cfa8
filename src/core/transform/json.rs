//! Structured (JSON) normalization
//!
//! Parses content into a tree, applies ignore rules at every object entry and
//! prints the tree back in canonical form: keys in lexical order (serde_json's
//! default map is ordered), two-space indentation, trailing newline.

use serde_json::{Map, Value};

use super::ignore::{IgnoreAction, IgnoreRule, REDACTED};
use crate::error::Result;

/// Parse, apply ignore rules, and re-serialize `input` canonically
///
/// Returns [`crate::SnapshotError::MalformedInput`] if `input` is not JSON.
pub fn normalize_json(input: &str, ignores: &[IgnoreRule]) -> Result<String> {
    let mut tree: Value = serde_json::from_str(input)?;
    apply_ignores(&mut tree, ignores);

    let mut out = serde_json::to_string_pretty(&tree)?;
    out.push('\n');
    Ok(out)
}

/// Walk the tree, redacting or omitting ignored entries
///
/// A matched entry is not descended into.
pub fn apply_ignores(value: &mut Value, ignores: &[IgnoreRule]) {
    if ignores.is_empty() {
        return;
    }

    match value {
        Value::Object(map) => apply_to_object(map, ignores),
        Value::Array(items) => {
            for item in items {
                apply_ignores(item, ignores);
            }
        },
        _ => {},
    }
}

fn apply_to_object(map: &mut Map<String, Value>, ignores: &[IgnoreRule]) {
    let mut omitted = Vec::new();

    for (key, child) in map.iter_mut() {
        match matching_action(key, child, ignores) {
            Some(IgnoreAction::Omit) => omitted.push(key.clone()),
            Some(IgnoreAction::Redact) => *child = Value::String(REDACTED.to_string()),
            None => apply_ignores(child, ignores),
        }
    }

    for key in omitted {
        log::debug!("omitting ignored key '{key}'");
        map.remove(&key);
    }
}

/// First matching rule's action; omission wins over redaction when both match
fn matching_action(key: &str, value: &Value, ignores: &[IgnoreRule]) -> Option<IgnoreAction> {
    let text = stringify(value);
    let mut action = None;
    for rule in ignores {
        if rule.should_ignore(key, &text) {
            if rule.action() == IgnoreAction::Omit {
                return Some(IgnoreAction::Omit);
            }
            action = Some(IgnoreAction::Redact);
        }
    }
    action
}

/// String form of a value as seen by ignore rules
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
