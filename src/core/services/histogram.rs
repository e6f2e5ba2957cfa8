//! Histogram line diff
//!
//! Compares two texts line by line and classifies every line as shared,
//! removed or added. The algorithm:
//!
//! 1. Lines common to the start and end of the current window are shared.
//! 2. Inside what remains, an anchor is a line occurring exactly once on each
//!    side of the window. Anchors are extended over equal neighbours into runs.
//!    The run with the lowest whole-file occurrence count wins, then the longest,
//!    then the one starting earliest in the old text.
//! 3. The anchor run is shared; the windows before and after it are diffed the
//!    same way.
//! 4. A window with no anchor emits all its old lines as removed, followed by
//!    all its new lines as added.
//!
//! Recursion is expressed as an explicit work stack so deep inputs cannot
//! overflow the call stack. The larger of the two windows around an anchor
//! inherits its parent's candidate runs, and only the smaller one is
//! rescanned, so evenly spread edits stay close to linearithmic.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::ops::Range;

use crate::core::models::DiffLine;

/// Compute a classified line diff between two texts
///
/// Lines are split on `\n`; an empty text has no lines, and a trailing newline
/// yields a final empty line. Joining the old-side texts with `\n` reproduces
/// `old` exactly, and likewise for `new`.
///
/// ```
/// use shutter::core::models::DiffLine;
/// use shutter::core::services::histogram_diff;
///
/// let diff = histogram_diff("a\nb\nc", "a\nx\nc");
/// assert_eq!(
///     diff,
///     vec![
///         DiffLine::shared("a", 1, 1),
///         DiffLine::removed("b", 2),
///         DiffLine::added("x", 2),
///         DiffLine::shared("c", 3, 3),
///     ]
/// );
/// ```
#[must_use]
pub fn histogram_diff(old: &str, new: &str) -> Vec<DiffLine> {
    Histogram::new(old, new).run()
}

/// Split text into lines, keeping a trailing empty line after a final newline
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Pending work on the diff stack
enum Step {
    /// Unresolved old/new windows, with anchor runs inherited from the parent
    Window {
        old: Range<usize>,
        new: Range<usize>,
        candidates: Option<Candidates>,
    },
    /// Equal lines starting at the given indices
    Shared {
        old_start: usize,
        new_start: usize,
        len: usize,
    },
    /// Window with no anchor: all removals, then all additions
    Replace {
        old: Range<usize>,
        new: Range<usize>,
    },
}

/// Ordering of anchor runs: lowest weight, then longest, then earliest
type RunKey = (usize, Reverse<usize>, usize, usize);

/// A run of equal lines on one diagonal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    old_start: usize,
    new_start: usize,
    len: usize,
    /// Lowest whole-file occurrence count among the anchors inside the run
    weight: usize,
}

impl Run {
    const fn key(&self) -> RunKey {
        (self.weight, Reverse(self.len), self.old_start, self.new_start)
    }

    const fn from_key((weight, Reverse(len), old_start, new_start): RunKey) -> Self {
        Self {
            old_start,
            new_start,
            len,
            weight,
        }
    }

    const fn contains(&self, old_index: usize, new_index: usize) -> bool {
        old_index >= self.old_start
            && old_index < self.old_start + self.len
            && old_index - self.old_start == new_index.wrapping_sub(self.new_start)
    }

    /// The part of the run inside the given window, keeping the weight
    fn clip(&self, old: &Range<usize>, new: &Range<usize>) -> Option<Self> {
        let skip = old
            .start
            .saturating_sub(self.old_start)
            .max(new.start.saturating_sub(self.new_start));
        let end = self
            .len
            .min(old.end.saturating_sub(self.old_start))
            .min(new.end.saturating_sub(self.new_start));
        (skip < end).then(|| Self {
            old_start: self.old_start + skip,
            new_start: self.new_start + skip,
            len: end - skip,
            weight: self.weight,
        })
    }
}

/// Anchor runs of an enclosing window, best first
///
/// Shrinking the window can only clip a run, which makes its key worse, so
/// stored keys are lower bounds. Runs are rechecked against the current
/// window when popped. Lines that become unique only in the smaller window
/// are added when the candidates move into it.
struct Candidates {
    heap: BinaryHeap<Reverse<RunKey>>,
    /// Window every anchor in it was found for
    old: Range<usize>,
    new: Range<usize>,
}

/// Where a line occurs in each text, in ascending order
#[derive(Default)]
struct Occurrences {
    old: Vec<usize>,
    new: Vec<usize>,
}

impl Occurrences {
    fn weight(&self) -> usize {
        self.old.len() + self.new.len()
    }
}

struct Histogram<'a> {
    old: Vec<&'a str>,
    new: Vec<&'a str>,
    occurrences: HashMap<&'a str, Occurrences>,
    /// Hand a window's candidates down to its larger sub-window instead of
    /// rescanning it
    reuse_candidates: bool,
}

impl<'a> Histogram<'a> {
    fn new(old: &'a str, new: &'a str) -> Self {
        let old = split_lines(old);
        let new = split_lines(new);

        let mut occurrences: HashMap<&str, Occurrences> = HashMap::new();
        for (i, line) in old.iter().enumerate() {
            occurrences.entry(*line).or_default().old.push(i);
        }
        for (j, line) in new.iter().enumerate() {
            occurrences.entry(*line).or_default().new.push(j);
        }

        Self {
            old,
            new,
            occurrences,
            reuse_candidates: true,
        }
    }

    fn run(&self) -> Vec<DiffLine> {
        let mut out = Vec::with_capacity(self.old.len().max(self.new.len()));
        let mut stack = vec![Step::Window {
            old: 0..self.old.len(),
            new: 0..self.new.len(),
            candidates: None,
        }];

        while let Some(step) = stack.pop() {
            match step {
                Step::Shared {
                    old_start,
                    new_start,
                    len,
                } => {
                    for k in 0..len {
                        out.push(DiffLine::shared(
                            self.old[old_start + k],
                            old_start + k + 1,
                            new_start + k + 1,
                        ));
                    }
                },
                Step::Replace { old, new } => {
                    for i in old {
                        out.push(DiffLine::removed(self.old[i], i + 1));
                    }
                    for j in new {
                        out.push(DiffLine::added(self.new[j], j + 1));
                    }
                },
                Step::Window {
                    old,
                    new,
                    candidates,
                } => self.split_window(old, new, candidates, &mut stack),
            }
        }

        out
    }

    /// Push the steps resolving one window, in reverse emission order
    fn split_window(
        &self,
        old: Range<usize>,
        new: Range<usize>,
        inherited: Option<Candidates>,
        stack: &mut Vec<Step>,
    ) {
        let prefix = self.common_prefix(&old, &new);
        let suffix = self.common_suffix(
            &(old.start + prefix..old.end),
            &(new.start + prefix..new.end),
        );
        let inner_old = old.start + prefix..old.end - suffix;
        let inner_new = new.start + prefix..new.end - suffix;

        if suffix > 0 {
            stack.push(Step::Shared {
                old_start: inner_old.end,
                new_start: inner_new.end,
                len: suffix,
            });
        }

        let mut candidates = if inner_old.is_empty() || inner_new.is_empty() {
            None
        } else {
            Some(match inherited {
                Some(parent) => self.narrow(parent, &inner_old, &inner_new),
                None => self.scan(&inner_old, &inner_new),
            })
        };

        let best = candidates.as_mut().and_then(|c| self.best_run(c));
        match best {
            Some(run) => {
                let before_old = inner_old.start..run.old_start;
                let before_new = inner_new.start..run.new_start;
                let after_old = run.old_start + run.len..inner_old.end;
                let after_new = run.new_start + run.len..inner_new.end;

                let candidates = candidates.filter(|_| self.reuse_candidates);
                let before_is_larger =
                    before_old.len() + before_new.len() >= after_old.len() + after_new.len();
                let (before_candidates, after_candidates) = if before_is_larger {
                    (candidates, None)
                } else {
                    (None, candidates)
                };

                stack.push(Step::Window {
                    old: after_old,
                    new: after_new,
                    candidates: after_candidates,
                });
                stack.push(Step::Shared {
                    old_start: run.old_start,
                    new_start: run.new_start,
                    len: run.len,
                });
                stack.push(Step::Window {
                    old: before_old,
                    new: before_new,
                    candidates: before_candidates,
                });
            },
            None if inner_old.is_empty() && inner_new.is_empty() => {},
            None => stack.push(Step::Replace {
                old: inner_old,
                new: inner_new,
            }),
        }

        if prefix > 0 {
            stack.push(Step::Shared {
                old_start: old.start,
                new_start: new.start,
                len: prefix,
            });
        }
    }

    fn common_prefix(&self, old: &Range<usize>, new: &Range<usize>) -> usize {
        self.old[old.clone()]
            .iter()
            .zip(&self.new[new.clone()])
            .take_while(|(a, b)| a == b)
            .count()
    }

    fn common_suffix(&self, old: &Range<usize>, new: &Range<usize>) -> usize {
        self.old[old.clone()]
            .iter()
            .rev()
            .zip(self.new[new.clone()].iter().rev())
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Collect every anchor run of a window from scratch
    fn scan(&self, old: &Range<usize>, new: &Range<usize>) -> Candidates {
        // line -> (count in old window, count in new window, last old index, last new index)
        let mut window: HashMap<&str, (usize, usize, usize, usize)> = HashMap::new();
        for i in old.clone() {
            let entry = window.entry(self.old[i]).or_insert((0, 0, i, 0));
            entry.0 += 1;
            entry.2 = i;
        }
        for j in new.clone() {
            if let Some(entry) = window.get_mut(self.new[j]) {
                entry.1 += 1;
                entry.3 = j;
            }
        }

        let mut anchors: Vec<(usize, usize)> = window
            .values()
            .filter(|(old_count, new_count, _, _)| *old_count == 1 && *new_count == 1)
            .map(|&(_, _, i, j)| (i, j))
            .collect();
        anchors.sort_unstable();

        let mut runs: Vec<Run> = Vec::new();
        for (i, j) in anchors {
            let weight = self.weight(self.old[i]);

            // Anchors are unique per side, so a later anchor can only fall
            // inside the run built most recently.
            if let Some(last) = runs.last_mut()
                && last.contains(i, j)
            {
                last.weight = last.weight.min(weight);
                continue;
            }

            runs.push(self.extend(i, j, old, new, weight));
        }

        Candidates {
            heap: runs.iter().map(|run| Reverse(run.key())).collect(),
            old: old.clone(),
            new: new.clone(),
        }
    }

    /// Move a parent's candidates into one of its sub-windows
    ///
    /// Parent anchors inside the sub-window stay unique there. New anchors can
    /// only be lines that lost an occurrence, which all lie in the part of the
    /// parent window left behind.
    fn narrow(&self, mut candidates: Candidates, old: &Range<usize>, new: &Range<usize>) -> Candidates {
        let dropped_old = outside(&candidates.old, old).map(|i| self.old[i]);
        let dropped_new = outside(&candidates.new, new).map(|j| self.new[j]);

        let mut seen = HashSet::new();
        for line in dropped_old.chain(dropped_new) {
            if !seen.insert(line) {
                continue;
            }
            if let Some((i, j)) = self.unique_in(line, old, new) {
                let run = self.extend(i, j, old, new, self.weight(line));
                candidates.heap.push(Reverse(run.key()));
            }
        }

        candidates.old = old.clone();
        candidates.new = new.clone();
        candidates
    }

    /// Pop the best anchor run still valid in the candidates' window
    fn best_run(&self, candidates: &mut Candidates) -> Option<Run> {
        while let Some(Reverse(key)) = candidates.heap.pop() {
            let run = Run::from_key(key);
            let Some(clipped) = run.clip(&candidates.old, &candidates.new) else {
                continue;
            };
            if clipped == run {
                return Some(run);
            }
            if let Some(weight) = self.anchor_weight(&clipped, &candidates.old, &candidates.new) {
                candidates.heap.push(Reverse(Run { weight, ..clipped }.key()));
            }
        }
        None
    }

    /// Lowest weight among the lines of `run` that are anchors in the window
    fn anchor_weight(&self, run: &Run, old: &Range<usize>, new: &Range<usize>) -> Option<usize> {
        self.old[run.old_start..run.old_start + run.len]
            .iter()
            .filter(|line| self.unique_in(line, old, new).is_some())
            .map(|line| self.weight(line))
            .min()
    }

    /// Positions of `line` if it occurs exactly once on each side of the window
    fn unique_in(&self, line: &str, old: &Range<usize>, new: &Range<usize>) -> Option<(usize, usize)> {
        let occurrences = self.occurrences.get(line)?;
        match (within(&occurrences.old, old), within(&occurrences.new, new)) {
            ([i], [j]) => Some((*i, *j)),
            _ => None,
        }
    }

    /// Grow a single-line match backward and forward over equal lines
    fn extend(&self, i: usize, j: usize, old: &Range<usize>, new: &Range<usize>, weight: usize) -> Run {
        let mut start_old = i;
        let mut start_new = j;
        while start_old > old.start
            && start_new > new.start
            && self.old[start_old - 1] == self.new[start_new - 1]
        {
            start_old -= 1;
            start_new -= 1;
        }

        let mut end_old = i + 1;
        let mut end_new = j + 1;
        while end_old < old.end && end_new < new.end && self.old[end_old] == self.new[end_new] {
            end_old += 1;
            end_new += 1;
        }

        Run {
            old_start: start_old,
            new_start: start_new,
            len: end_old - start_old,
            weight,
        }
    }

    fn weight(&self, line: &str) -> usize {
        self.occurrences.get(line).map_or(0, Occurrences::weight)
    }
}

/// Sorted positions falling inside `range`
fn within<'p>(positions: &'p [usize], range: &Range<usize>) -> &'p [usize] {
    let start = positions.partition_point(|&p| p < range.start);
    let end = positions.partition_point(|&p| p < range.end);
    &positions[start..end]
}

/// Indices of `outer` not covered by `inner`, which must lie inside it
fn outside(outer: &Range<usize>, inner: &Range<usize>) -> impl Iterator<Item = usize> + use<> {
    (outer.start..inner.start).chain(inner.end..outer.end)
}
