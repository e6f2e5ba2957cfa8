//! Review service - walks pending snapshots and applies decisions
//!
//! The interactive loop reads one line per decision from any [`BufRead`] and
//! writes prompts to any [`Write`], so sessions can be scripted in tests.
//! Each decision is applied to the store as soon as it is made; quitting keeps
//! everything decided so far.

use std::io::{BufRead, Write};

use serde::Serialize;

use super::histogram::histogram_diff;
use crate::core::models::{DiffLine, Slot, Snapshot};
use crate::core::ports::SnapshotStore;
use crate::error::{Result, SnapshotError};
use crate::output;

/// A reviewer's answer for one pending snapshot
///
/// Single-letter keys are case-sensitive: the uppercase letter applies the
/// action to the current snapshot and every one after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChoice {
    /// Promote to baseline
    Accept,
    /// Discard the pending snapshot
    Reject,
    /// Leave it pending
    Skip,
    /// Accept this and every remaining snapshot, then stop
    AcceptRemaining,
    /// Reject this and every remaining snapshot, then stop
    RejectRemaining,
    /// Leave this and every remaining snapshot pending, then stop
    SkipRemaining,
    /// Switch between the diff view and the full new content
    ToggleDiff,
    /// Stop reviewing
    Quit,
}

impl ReviewChoice {
    /// Parse one line of input (`a`, `accept`, `A`, `accept-all`, ...)
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        match input {
            "A" => return Some(Self::AcceptRemaining),
            "R" => return Some(Self::RejectRemaining),
            "S" => return Some(Self::SkipRemaining),
            _ => {},
        }
        match input.to_ascii_lowercase().as_str() {
            "a" | "accept" => Some(Self::Accept),
            "r" | "reject" => Some(Self::Reject),
            "s" | "skip" => Some(Self::Skip),
            "accept-all" => Some(Self::AcceptRemaining),
            "reject-all" => Some(Self::RejectRemaining),
            "skip-all" => Some(Self::SkipRemaining),
            "d" | "diff" => Some(Self::ToggleDiff),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }

    /// The decision this choice ends the prompt with, if any
    const fn verdict(self) -> Option<Verdict> {
        match self {
            Self::Accept => Some(Verdict::One(Action::Accept)),
            Self::Reject => Some(Verdict::One(Action::Reject)),
            Self::Skip => Some(Verdict::One(Action::Skip)),
            Self::AcceptRemaining => Some(Verdict::Remaining(Action::Accept)),
            Self::RejectRemaining => Some(Verdict::Remaining(Action::Reject)),
            Self::SkipRemaining => Some(Verdict::Remaining(Action::Skip)),
            Self::Quit => Some(Verdict::Quit),
            Self::ToggleDiff => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Accept,
    Reject,
    Skip,
}

/// Terminal outcome of prompting for one snapshot
#[derive(Debug, Clone, Copy)]
enum Verdict {
    One(Action),
    Remaining(Action),
    Quit,
}

/// Counts from one review session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    /// Snapshots promoted to baseline
    pub accepted: usize,
    /// Pending snapshots discarded
    pub rejected: usize,
    /// Snapshots left pending (skipped, unreadable or failed)
    pub skipped: usize,
    /// Whether the session ended before every snapshot was seen
    pub interrupted: bool,
}

impl ReviewSummary {
    /// Number of snapshots a decision was applied to
    #[must_use]
    pub const fn decided(&self) -> usize {
        self.accepted + self.rejected
    }
}

/// Interactive reviewer over a store
#[derive(Debug)]
pub struct Reviewer<'a, S, R, W> {
    store: &'a S,
    input: R,
    output: W,
}

impl<'a, S: SnapshotStore, R: BufRead, W: Write> Reviewer<'a, S, R, W> {
    /// Review `store`, reading decisions from `input` and writing to `output`
    pub const fn new(store: &'a S, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Walk every pending snapshot in identifier order
    ///
    /// Store failures on a single snapshot are reported and that snapshot is
    /// counted as skipped. Only failures to list the store or to write the
    /// prompt end the session with an error.
    pub fn run(mut self) -> Result<ReviewSummary> {
        let pending = self.store.list_pending()?;
        let mut summary = ReviewSummary::default();

        if pending.is_empty() {
            writeln!(self.output, "No pending snapshots.")?;
            return Ok(summary);
        }

        let total = pending.len();
        for (index, id) in pending.iter().enumerate() {
            writeln!(self.output, "\n[{}/{}] {}", index + 1, total, id)?;

            let (snapshot, baseline) = match self.load(id) {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("skipping '{id}': {e}");
                    writeln!(self.output, "Cannot read '{id}': {e}")?;
                    summary.skipped += 1;
                    continue;
                },
            };

            match self.decide(&snapshot, baseline.as_ref())? {
                Verdict::One(action) => {
                    self.apply(id, action, &mut summary)?;
                },
                Verdict::Remaining(action) => {
                    for id in &pending[index..] {
                        if !self.apply(id, action, &mut summary)? {
                            summary.interrupted = true;
                            break;
                        }
                    }
                    break;
                },
                Verdict::Quit => {
                    summary.interrupted = true;
                    break;
                },
            }
        }

        log::info!(
            "review finished: {} accepted, {} rejected, {} skipped",
            summary.accepted,
            summary.rejected,
            summary.skipped
        );
        Ok(summary)
    }

    fn load(&self, id: &str) -> Result<(Snapshot, Option<Snapshot>)> {
        let snapshot = self.store.read(id, Slot::Pending)?;
        let baseline = match self.store.read(id, Slot::Baseline) {
            Ok(baseline) => Some(baseline),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };
        Ok((snapshot, baseline))
    }

    /// Show the snapshot and prompt until a terminal choice is made.
    /// End of input counts as quitting.
    fn decide(&mut self, snapshot: &Snapshot, baseline: Option<&Snapshot>) -> Result<Verdict> {
        let diff = baseline.map(|b| histogram_diff(&b.content, &snapshot.content));
        let mut show_diff = diff.is_some();
        self.show(snapshot, diff.as_deref(), show_diff)?;

        loop {
            write!(
                self.output,
                "[a]ccept  [r]eject  [s]kip  [d]iff/full  [q]uit  (A/R/S: all remaining) > "
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(Verdict::Quit);
            }

            let Some(choice) = ReviewChoice::parse(&line) else {
                writeln!(self.output, "Unknown choice '{}'", line.trim())?;
                continue;
            };
            if let Some(verdict) = choice.verdict() {
                return Ok(verdict);
            }
            if diff.is_some() {
                show_diff = !show_diff;
                self.show(snapshot, diff.as_deref(), show_diff)?;
            } else {
                writeln!(self.output, "No baseline to diff against.")?;
            }
        }
    }

    /// Apply `action` to `id`; `false` if the store refused it
    fn apply(&mut self, id: &str, action: Action, summary: &mut ReviewSummary) -> Result<bool> {
        match action {
            Action::Accept => match self.store.accept(id) {
                Ok(()) => {
                    writeln!(self.output, "Accepted {id}")?;
                    summary.accepted += 1;
                },
                Err(e) => return self.report_failure(id, "accept", &e, summary).map(|()| false),
            },
            Action::Reject => match self.store.reject(id) {
                Ok(()) => {
                    writeln!(self.output, "Rejected {id}")?;
                    summary.rejected += 1;
                },
                Err(e) => return self.report_failure(id, "reject", &e, summary).map(|()| false),
            },
            Action::Skip => {
                writeln!(self.output, "Skipped {id}")?;
                summary.skipped += 1;
            },
        }
        Ok(true)
    }

    fn show(&mut self, snapshot: &Snapshot, diff: Option<&[DiffLine]>, show_diff: bool) -> Result<()> {
        let rendered = match diff {
            Some(diff) if show_diff => output::render_diff_snapshot(snapshot, diff),
            _ => output::render_new_snapshot(snapshot),
        };
        write!(self.output, "{rendered}")?;
        Ok(())
    }

    fn report_failure(
        &mut self,
        id: &str,
        action: &str,
        error: &SnapshotError,
        summary: &mut ReviewSummary,
    ) -> Result<()> {
        log::warn!("failed to {action} '{id}': {error}");
        writeln!(self.output, "Failed to {action} {id}: {error}")?;
        summary.skipped += 1;
        Ok(())
    }
}

/// Review `store` interactively over the given streams
pub fn review<S: SnapshotStore>(store: &S, input: impl BufRead, output: impl Write) -> Result<ReviewSummary> {
    Reviewer::new(store, input, output).run()
}

/// Accept every pending snapshot, stopping at the first failure
///
/// Returns how many were accepted.
pub fn accept_all<S: SnapshotStore>(store: &S) -> Result<usize> {
    let pending = store.list_pending()?;
    for id in &pending {
        store.accept(id)?;
    }
    log::info!("accepted {} snapshot(s)", pending.len());
    Ok(pending.len())
}

/// Reject every pending snapshot, stopping at the first failure
///
/// Returns how many were rejected.
pub fn reject_all<S: SnapshotStore>(store: &S) -> Result<usize> {
    let pending = store.list_pending()?;
    for id in &pending {
        store.reject(id)?;
    }
    log::info!("rejected {} snapshot(s)", pending.len());
    Ok(pending.len())
}
