//! Test name normalization
//!
//! The mapping from a human-readable test name to the identifier used in file
//! names is part of the storage format: changing it orphans existing stores.

/// Separator inserted between words
const SEPARATOR: char = '_';

/// Map a test name to a filesystem-safe identifier
///
/// A separator goes before every ASCII capital after the first character, the
/// result is lowercased, runs of anything other than `[a-z0-9]` collapse to a
/// single separator, and leading/trailing separators are trimmed.
///
/// ```
/// use shutter::core::models::normalize_identifier;
///
/// assert_eq!(normalize_identifier("TestHTTPClient"), "test_h_t_t_p_client");
/// assert_eq!(normalize_identifier("users / list (page 2)"), "users_list_page_2");
/// ```
#[must_use]
pub fn normalize_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    let mut pending_separator = false;

    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            pending_separator = true;
        }

        let lower = c.to_ascii_lowercase();
        if lower.is_ascii_lowercase() || lower.is_ascii_digit() {
            if pending_separator && !out.is_empty() {
                out.push(SEPARATOR);
            }
            pending_separator = false;
            out.push(lower);
        } else {
            pending_separator = true;
        }
    }

    out
}
