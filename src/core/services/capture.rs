//! Capture service - records test output against the snapshot store
//!
//! A capture transforms raw content, compares it with the baseline and, when
//! the two differ (or there is no baseline yet), writes the pending slot.
//! Matching content leaves the baseline untouched and discards any stale
//! pending snapshot left by an earlier failing run.

use std::fmt::Debug;

use serde::Serialize;

use super::histogram::histogram_diff;
use crate::adapters::file::FileSnapshotStore;
use crate::config::Config;
use crate::core::models::{DiffLine, Slot, Snapshot};
use crate::core::ports::SnapshotStore;
use crate::core::transform::{ContentMode, Transform};
use crate::error::Result;

/// What a capture did to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Content equals the baseline; nothing was written
    Matched,
    /// No baseline existed; the content was written as pending
    Created,
    /// Content differs from the baseline; the content was written as pending
    Changed {
        /// Baseline against captured content
        diff: Vec<DiffLine>,
    },
}

impl CaptureOutcome {
    /// Whether the content matched its baseline
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched)
    }
}

/// Entry point for recording snapshots
#[derive(Debug, Clone)]
pub struct Snapshotter<S> {
    store: S,
    version: String,
}

impl Snapshotter<FileSnapshotStore> {
    /// File-backed snapshotter for the discovered project
    pub fn discover() -> Result<Self> {
        Ok(Self::from_config(&Config::discover()?))
    }

    /// File-backed snapshotter for an already resolved configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(FileSnapshotStore::from_config(config), config.version())
    }
}

impl<S: SnapshotStore> Snapshotter<S> {
    /// Record into `store`, tagging snapshots with `version`
    pub fn new(store: S, version: impl Into<String>) -> Self {
        Self {
            store,
            version: version.into(),
        }
    }

    /// Underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Version tag written into new snapshots
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Start a capture with metadata and rules
    pub fn capture(&self, test_name: impl Into<String>) -> Capture<'_, S> {
        Capture {
            snapshotter: self,
            test_name: test_name.into(),
            title: None,
            func_name: None,
            file_name: None,
            transform: Transform::new(),
        }
    }

    /// Snapshot plain text
    pub fn snap_string(&self, test_name: &str, content: &str, transform: &Transform) -> Result<CaptureOutcome> {
        self.capture(test_name)
            .transform(transform.clone())
            .string(content)
    }

    /// Snapshot a JSON document, normalized and with ignore rules applied
    pub fn snap_json(&self, test_name: &str, json: &str, transform: &Transform) -> Result<CaptureOutcome> {
        self.capture(test_name).transform(transform.clone()).json(json)
    }

    /// Snapshot the pretty `Debug` rendering of a value
    pub fn snap_debug<T: Debug + ?Sized>(
        &self,
        test_name: &str,
        value: &T,
        transform: &Transform,
    ) -> Result<CaptureOutcome> {
        self.capture(test_name)
            .transform(transform.clone())
            .debug(value)
    }

    /// Snapshot a serializable value in JSON mode
    pub fn snap_serialize<T: Serialize + ?Sized>(
        &self,
        test_name: &str,
        value: &T,
        transform: &Transform,
    ) -> Result<CaptureOutcome> {
        self.capture(test_name)
            .transform(transform.clone())
            .serialize(value)
    }
}

/// A pending capture, built up before its content is recorded
#[derive(Debug)]
pub struct Capture<'a, S> {
    snapshotter: &'a Snapshotter<S>,
    test_name: String,
    title: Option<String>,
    func_name: Option<String>,
    file_name: Option<String>,
    transform: Transform,
}

impl<S: SnapshotStore> Capture<'_, S> {
    /// Human-readable title shown during review
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Function that produced the snapshot
    #[must_use]
    pub fn func_name(mut self, func_name: impl Into<String>) -> Self {
        self.func_name = Some(func_name.into());
        self
    }

    /// Source file of the test
    #[must_use]
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Rules applied before comparison
    #[must_use]
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Record plain text
    pub fn string(self, content: &str) -> Result<CaptureOutcome> {
        self.record(content, ContentMode::Text)
    }

    /// Record a JSON document
    pub fn json(self, json: &str) -> Result<CaptureOutcome> {
        self.record(json, ContentMode::Json)
    }

    /// Record the `{:#?}` rendering of a value
    pub fn debug<T: Debug + ?Sized>(self, value: &T) -> Result<CaptureOutcome> {
        let content = format!("{value:#?}\n");
        self.record(&content, ContentMode::Text)
    }

    /// Record a serializable value as JSON
    pub fn serialize<T: Serialize + ?Sized>(self, value: &T) -> Result<CaptureOutcome> {
        let json = serde_json::to_string(value)?;
        self.record(&json, ContentMode::Json)
    }

    fn record(self, raw: &str, mode: ContentMode) -> Result<CaptureOutcome> {
        let content = self.transform.apply(raw, mode)?;
        let store = self.snapshotter.store();

        let baseline = match store.read(&self.test_name, Slot::Baseline) {
            Ok(baseline) => Some(baseline),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };

        if let Some(baseline) = &baseline
            && baseline.content == content
        {
            log::debug!("snapshot '{}' matches baseline", self.test_name);
            match store.reject(&self.test_name) {
                Ok(()) => log::debug!("discarded stale pending snapshot for '{}'", self.test_name),
                Err(e) if e.is_not_found() => {},
                Err(e) => return Err(e),
            }
            return Ok(CaptureOutcome::Matched);
        }

        let mut snapshot = Snapshot::new(self.snapshotter.version(), self.test_name, content);
        snapshot.title = self.title;
        snapshot.func_name = self.func_name;
        snapshot.file_name = self.file_name;
        store.save(&snapshot, Slot::Pending)?;

        Ok(match baseline {
            None => {
                log::debug!("new snapshot '{}' written as pending", snapshot.test_name);
                CaptureOutcome::Created
            },
            Some(baseline) => {
                log::debug!("snapshot '{}' changed, written as pending", snapshot.test_name);
                CaptureOutcome::Changed {
                    diff: histogram_diff(&baseline.content, &snapshot.content),
                }
            },
        })
    }
}

/// Snapshot `content` for `name`, panicking with a review hint unless it
/// matches the accepted baseline.
///
/// The project is discovered from `CARGO_MANIFEST_DIR`. An optional third
/// argument supplies a [`Transform`](crate::core::transform::Transform).
///
/// ```no_run
/// shutter::assert_snapshot!("greeting", "hello\n");
/// ```
#[macro_export]
macro_rules! assert_snapshot {
    ($name:expr, $content:expr $(,)?) => {
        $crate::assert_snapshot!($name, $content, &$crate::core::transform::Transform::new())
    };
    ($name:expr, $content:expr, $transform:expr $(,)?) => {{
        let snapshotter = $crate::core::services::Snapshotter::discover()
            .unwrap_or_else(|e| panic!("snapshot store unavailable: {e}"));
        let outcome = snapshotter
            .capture($name)
            .func_name(module_path!())
            .file_name(file!())
            .transform(::std::clone::Clone::clone($transform))
            .string(::std::convert::AsRef::<str>::as_ref(&$content))
            .unwrap_or_else(|e| panic!("snapshot '{}' failed: {e}", $name));
        match outcome {
            $crate::core::services::CaptureOutcome::Matched => {},
            $crate::core::services::CaptureOutcome::Created => {
                panic!("new snapshot '{}' created - run 'shutter review' to accept", $name)
            },
            $crate::core::services::CaptureOutcome::Changed { diff } => panic!(
                "snapshot '{}' mismatch - run 'shutter review' to update\n{}",
                $name,
                $crate::output::render_diff_plain(&diff)
            ),
        }
    }};
}
