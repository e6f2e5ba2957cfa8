//! Snapshot file format
//!
//! ```text
//! ---
//! title: Login page
//! test_name: TestLoginPage
//! func_name: login_page
//! file_name: tests/login.rs
//! version: 0.1.0
//! ---
//! <content, verbatim, to end of file>
//! ```
//!
//! Optional keys are written only when set. Unknown header keys are ignored
//! when reading. Header values are single-line: [`serialize`] writes line
//! breaks in them as spaces, and the file store refuses such snapshots (see
//! [`unwritable_header`]) so every stored file reads back unchanged.

use thiserror::Error;

use crate::core::models::Snapshot;

/// Header delimiter line
pub const DELIMITER: &str = "---";

/// Why a snapshot file failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Fewer than two delimiter lines
    #[error("expected two '---' delimiter lines, found {0}")]
    MissingDelimiter(usize),
}

/// Render a snapshot in file form
#[must_use]
pub fn serialize(snapshot: &Snapshot) -> String {
    let mut out = String::with_capacity(snapshot.content.len() + 128);
    out.push_str(DELIMITER);
    out.push('\n');

    for (key, value) in headers(snapshot) {
        if let Some(value) = value {
            push_header(&mut out, key, value);
        }
    }

    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(&snapshot.content);
    out
}

/// First header key whose value has a line break and would not read back
#[must_use]
pub fn unwritable_header(snapshot: &Snapshot) -> Option<&'static str> {
    headers(snapshot)
        .into_iter()
        .find(|(_, value)| value.is_some_and(|v| v.contains(['\r', '\n'])))
        .map(|(key, _)| key)
}

/// Header keys in file order, `None` for unset optional ones
fn headers(snapshot: &Snapshot) -> [(&'static str, Option<&str>); 5] {
    [
        ("title", snapshot.title.as_deref()),
        ("test_name", Some(&snapshot.test_name)),
        ("func_name", snapshot.func_name.as_deref()),
        ("file_name", snapshot.file_name.as_deref()),
        ("version", Some(&snapshot.version)),
    ]
}

fn push_header(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(": ");
    out.push_str(&value.replace(['\r', '\n'], " "));
    out.push('\n');
}

/// Parse a snapshot from file form
pub fn deserialize(raw: &str) -> Result<Snapshot, ParseError> {
    // (start of delimiter line, start of the line after it)
    let mut delimiters: Vec<(usize, usize)> = Vec::with_capacity(2);
    let mut offset = 0;

    for line in raw.split_inclusive('\n') {
        if trim_eol(line) == DELIMITER {
            delimiters.push((offset, offset + line.len()));
            if delimiters.len() == 2 {
                break;
            }
        }
        offset += line.len();
    }

    let [(_, header_start), (header_end, content_start)] = delimiters[..] else {
        return Err(ParseError::MissingDelimiter(delimiters.len()));
    };

    let mut snapshot = Snapshot::new("", "", &raw[content_start..]);
    for line in raw[header_start..header_end].lines() {
        let line = trim_eol(line);
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.strip_prefix(' ').unwrap_or(value).to_string();

        match key.trim() {
            "version" => snapshot.version = value,
            "test_name" => snapshot.test_name = value,
            "title" => snapshot.title = Some(value),
            "func_name" => snapshot.func_name = Some(value),
            "file_name" => snapshot.file_name = Some(value),
            other => log::debug!("ignoring unknown snapshot header '{other}'"),
        }
    }

    Ok(snapshot)
}

fn trim_eol(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
