//! Output formatting for human and JSON modes
//!
//! Snapshot and diff views are returned as strings so the review loop can
//! write them to any stream. Command results print themselves either as
//! human-readable text or machine-parseable JSON.

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{DiffKind, DiffLine, Snapshot};
use crate::core::services::{ReviewSummary, split_lines};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

// =============================================================================
// Snapshot views
// =============================================================================

fn header(snapshot: &Snapshot, label: &str) -> String {
    let mut out = format!("{} {}\n", label.bold(), snapshot.display_name().bold());
    if snapshot.title.is_some() {
        let _ = writeln!(out, "  test: {}", snapshot.test_name);
    }
    if let Some(func) = &snapshot.func_name {
        let _ = writeln!(out, "  func: {func}");
    }
    if let Some(file) = &snapshot.file_name {
        let _ = writeln!(out, "  file: {file}");
    }
    out
}

fn number(n: Option<usize>) -> String {
    n.map_or_else(|| "    ".to_string(), |n| format!("{n:>4}"))
}

fn diff_line_plain(line: &DiffLine) -> String {
    let sign = match line.kind {
        DiffKind::Shared => ' ',
        DiffKind::Removed => '-',
        DiffKind::Added => '+',
    };
    format!(
        "{sign} {} {} | {}",
        number(line.old_line),
        number(line.new_line),
        line.text
    )
}

/// Diff lines with old/new line gutters, without color
#[must_use]
pub fn render_diff_plain(diff: &[DiffLine]) -> String {
    diff.iter().fold(String::new(), |mut out, line| {
        let _ = writeln!(out, "{}", diff_line_plain(line));
        out
    })
}

/// Diff lines with gutters; removals red, additions green
#[must_use]
pub fn render_diff(diff: &[DiffLine]) -> String {
    diff.iter().fold(String::new(), |mut out, line| {
        let text = diff_line_plain(line);
        let _ = match line.kind {
            DiffKind::Shared => writeln!(out, "{}", text.dimmed()),
            DiffKind::Removed => writeln!(out, "{}", text.red()),
            DiffKind::Added => writeln!(out, "{}", text.green()),
        };
        out
    })
}

/// A snapshot with no baseline: every line shown as an addition
#[must_use]
pub fn render_new_snapshot(snapshot: &Snapshot) -> String {
    let mut out = header(snapshot, "New snapshot:");
    for (i, line) in split_lines(&snapshot.content).into_iter().enumerate() {
        let _ = writeln!(out, "{}", format!("+ {:>4} | {line}", i + 1).green());
    }
    out
}

/// A pending snapshot against its baseline
#[must_use]
pub fn render_diff_snapshot(snapshot: &Snapshot, diff: &[DiffLine]) -> String {
    let mut out = header(snapshot, "Snapshot changed:");
    out.push_str(&render_diff(diff));
    out
}

// =============================================================================
// Command results
// =============================================================================

/// Result of an interactive review session
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReviewResult {
    /// Session counts
    #[serde(flatten)]
    pub summary: ReviewSummary,
}

/// Result of `accept-all` / `reject-all`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BatchResult {
    /// `accepted` or `rejected`
    pub action: &'static str,
    /// How many snapshots were processed
    pub count: usize,
}

/// Result of `list`
#[derive(Debug, Serialize)]
pub struct PendingListResult {
    /// Pending identifiers in lexical order
    pub pending: Vec<String>,
}

/// Result of `show`
#[derive(Debug, Serialize)]
pub struct ShowResult {
    /// The pending snapshot
    pub snapshot: Snapshot,
    /// Baseline content, if one exists
    pub baseline: Option<String>,
    /// Diff against the baseline, if one exists
    pub diff: Option<Vec<DiffLine>>,
}

impl ReviewResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                let s = &self.summary;
                println!(
                    "\nReview {}: {} accepted, {} rejected, {} skipped",
                    if s.interrupted { "stopped" } else { "complete" },
                    s.accepted,
                    s.rejected,
                    s.skipped
                );
            },
            OutputMode::Json => render_json(self),
        }
    }
}

impl BatchResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human if self.count == 0 => println!("No pending snapshots."),
            OutputMode::Human => println!("{} {} snapshot(s)", capitalize(self.action), self.count),
            OutputMode::Json => render_json(self),
        }
    }
}

impl PendingListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if self.pending.is_empty() {
                    println!("No pending snapshots.");
                    return;
                }
                println!("Pending snapshots:\n");
                for id in &self.pending {
                    println!("  {id}");
                }
                println!("\nRun 'shutter review' to accept or reject them.");
            },
            OutputMode::Json => render_json(self),
        }
    }
}

impl ShowResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => match &self.diff {
                Some(diff) => print!("{}", render_diff_snapshot(&self.snapshot, diff)),
                None => print!("{}", render_new_snapshot(&self.snapshot)),
            },
            OutputMode::Json => render_json(self),
        }
    }
}

fn render_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
