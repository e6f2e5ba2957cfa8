//! Histogram diff tests
//!
//! Pinned vectors for anchor choice and tie-breaking.

use shutter::core::models::{DiffKind, DiffLine};
use std::time::{Duration, Instant};

use shutter::core::services::histogram_diff;

fn old_text(diff: &[DiffLine]) -> Vec<&str> {
    diff.iter()
        .filter(|l| l.old_line.is_some())
        .map(|l| l.text.as_str())
        .collect()
}

fn new_text(diff: &[DiffLine]) -> Vec<&str> {
    diff.iter()
        .filter(|l| l.new_line.is_some())
        .map(|l| l.text.as_str())
        .collect()
}

// =============================================================================
// Basic shapes
// =============================================================================

#[test]
fn test_single_line_replacement() {
    let diff = histogram_diff("a\nb\nc", "a\nx\nc");
    assert_eq!(
        diff,
        vec![
            DiffLine::shared("a", 1, 1),
            DiffLine::removed("b", 2),
            DiffLine::added("x", 2),
            DiffLine::shared("c", 3, 3),
        ]
    );
}

#[test]
fn test_identical_is_all_shared() {
    let text = "one\ntwo\nthree";
    let diff = histogram_diff(text, text);
    assert_eq!(diff.len(), 3);
    for (i, line) in diff.iter().enumerate() {
        assert_eq!(line.kind, DiffKind::Shared);
        assert_eq!(line.old_line, Some(i + 1));
        assert_eq!(line.new_line, Some(i + 1));
    }
}

#[test]
fn test_disjoint_is_removals_then_additions() {
    let diff = histogram_diff("a\nb", "x\ny\nz");
    let kinds: Vec<DiffKind> = diff.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiffKind::Removed,
            DiffKind::Removed,
            DiffKind::Added,
            DiffKind::Added,
            DiffKind::Added,
        ]
    );
}

#[test]
fn test_empty_sides() {
    assert!(histogram_diff("", "").is_empty());
    assert_eq!(histogram_diff("", "a"), vec![DiffLine::added("a", 1)]);
    assert_eq!(histogram_diff("a", ""), vec![DiffLine::removed("a", 1)]);
}

#[test]
fn test_only_insertion_in_middle() {
    let diff = histogram_diff("a\nc", "a\nb\nc");
    assert_eq!(
        diff,
        vec![
            DiffLine::shared("a", 1, 1),
            DiffLine::added("b", 2),
            DiffLine::shared("c", 2, 3),
        ]
    );
}

// =============================================================================
// Anchor selection
// =============================================================================

#[test]
fn test_swapped_ends_keep_unique_middle() {
    let diff = histogram_diff("x\na\nb\ny", "y\na\nb\nx");
    assert_eq!(
        diff,
        vec![
            DiffLine::removed("x", 1),
            DiffLine::added("y", 1),
            DiffLine::shared("a", 2, 2),
            DiffLine::shared("b", 3, 3),
            DiffLine::removed("y", 4),
            DiffLine::added("x", 4),
        ]
    );
}

#[test]
fn test_insertion_between_repeated_lines() {
    let old = "fn a() {\n}\nfn b() {\n}";
    let new = "fn a() {\n    body();\n}\nfn b() {\n}";
    let diff = histogram_diff(old, new);
    let added: Vec<&str> = diff
        .iter()
        .filter(|l| l.kind == DiffKind::Added)
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(added, vec!["    body();"]);
    assert_eq!(diff.iter().filter(|l| l.kind == DiffKind::Removed).count(), 0);
}

#[test]
fn test_reconstructs_both_sides() {
    let old = "fn main() {\n    let x = 1;\n    println!(\"{x}\");\n}\n";
    let new = "fn main() {\n    let x = 2;\n    let y = 3;\n    println!(\"{x}\");\n}\n";
    let diff = histogram_diff(old, new);

    assert_eq!(old_text(&diff).join("\n"), old);
    assert_eq!(new_text(&diff).join("\n"), new);
}

// =============================================================================
// Scaling
// =============================================================================

#[test]
fn test_alternating_edits_scale() {
    let lines = 20_000;
    let side = |tag: &str| {
        (0..lines)
            .map(|i| if i % 2 == 0 { format!("keep {i}") } else { format!("{tag} {i}") })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let (old, new) = (side("old"), side("new"));

    let started = Instant::now();
    let diff = histogram_diff(&old, &new);
    let elapsed = started.elapsed();

    let count = |kind: DiffKind| diff.iter().filter(|l| l.kind == kind).count();
    assert_eq!(count(DiffKind::Shared), lines / 2);
    assert_eq!(count(DiffKind::Removed), lines / 2);
    assert_eq!(count(DiffKind::Added), lines / 2);
    assert!(
        elapsed < Duration::from_secs(10),
        "diff of {lines} alternating lines took {elapsed:?}"
    );
}
