//! Summary of a generation run.

use std::fmt;
use std::path::{Path, PathBuf};

/// Why a block was not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The base filename matched a skip glob.
    Pattern(String),
    /// The path was empty or would escape the output root.
    UnsafePath,
    /// A file already exists and overwrite is disabled.
    Exists,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Pattern(pattern) => write!(f, "matches skip pattern '{}'", pattern),
            SkipReason::UnsafePath => write!(f, "path escapes the output directory"),
            SkipReason::Exists => write!(f, "already exists"),
        }
    }
}

/// A block that was passed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBlock {
    /// Block path as it appeared in the document.
    pub path: String,
    pub reason: SkipReason,
}

/// What happened to a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    /// Absolute target path that was written (or would be, in a dry run).
    Written(PathBuf),
    Skipped(SkippedBlock),
}

/// Per-block outcomes of a run, in block order.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub outcomes: Vec<BlockOutcome>,
}

impl GenerateReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, target: PathBuf) {
        self.outcomes.push(BlockOutcome::Written(target));
    }

    pub fn skip(&mut self, path: impl Into<String>, reason: SkipReason) {
        self.outcomes.push(BlockOutcome::Skipped(SkippedBlock {
            path: path.into(),
            reason,
        }));
    }

    /// Written targets, in block order.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            BlockOutcome::Written(path) => Some(path.as_path()),
            BlockOutcome::Skipped(_) => None,
        })
    }

    /// Skipped blocks, in block order.
    pub fn skipped(&self) -> impl Iterator<Item = &SkippedBlock> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            BlockOutcome::Skipped(skipped) => Some(skipped),
            BlockOutcome::Written(_) => None,
        })
    }

    pub fn written_count(&self) -> usize {
        self.written().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }
}
