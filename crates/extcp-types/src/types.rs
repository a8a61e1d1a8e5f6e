//! Core data types for extcp
//!
//! Conflict decisions, progress updates and the per-run summary shared by the
//! engine and the front-ends.

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Unique identifier for a copy run
pub type RunId = uuid::Uuid;

/// Action taken for a single colliding file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConflictAction {
    /// Replace the existing destination file
    Overwrite,
    /// Copy under a generated `name(N).ext`
    Rename,
    /// Leave the destination untouched
    Skip,
    /// Stop the whole run
    Cancel,
}

/// One of the seven answers the user can give to a collision prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConflictChoice {
    /// Overwrite this file
    Overwrite,
    /// Overwrite this and every later collision
    OverwriteAll,
    /// Rename this file
    Rename,
    /// Rename this and every later collision
    RenameAll,
    /// Skip this file
    Skip,
    /// Skip this and every later collision
    SkipAll,
    /// Cancel the run
    Cancel,
}

impl ConflictChoice {
    /// All choices in prompt order
    pub const ALL: [ConflictChoice; 7] = [
        Self::Overwrite,
        Self::OverwriteAll,
        Self::Rename,
        Self::RenameAll,
        Self::Skip,
        Self::SkipAll,
        Self::Cancel,
    ];

    /// The action to perform for the current file
    pub fn action(self) -> ConflictAction {
        match self {
            Self::Overwrite | Self::OverwriteAll => ConflictAction::Overwrite,
            Self::Rename | Self::RenameAll => ConflictAction::Rename,
            Self::Skip | Self::SkipAll => ConflictAction::Skip,
            Self::Cancel => ConflictAction::Cancel,
        }
    }

    /// Whether this choice also applies to the rest of the run
    pub fn applies_to_all(self) -> bool {
        matches!(self, Self::OverwriteAll | Self::RenameAll | Self::SkipAll)
    }

    /// Wire name of the choice
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::OverwriteAll => "overwrite_all",
            Self::Rename => "rename",
            Self::RenameAll => "rename_all",
            Self::Skip => "skip",
            Self::SkipAll => "skip_all",
            Self::Cancel => "cancel",
        }
    }

    /// Human-readable label for prompts
    pub fn label(self) -> &'static str {
        match self {
            Self::Overwrite => "Overwrite",
            Self::OverwriteAll => "Overwrite All",
            Self::Rename => "Rename",
            Self::RenameAll => "Rename All",
            Self::Skip => "Skip",
            Self::SkipAll => "Skip All",
            Self::Cancel => "Cancel",
        }
    }
}

impl fmt::Display for ConflictChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(percent, copied, total)` progress tuple
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProgressUpdate {
    /// Percentage of processed files, in `[0, 100]`
    pub percent: f64,
    /// Files processed so far
    pub copied: u64,
    /// Files in the work set
    pub total: u64,
}

impl ProgressUpdate {
    /// Build an update, deriving the percentage from the counters
    pub fn new(copied: u64, total: u64) -> Self {
        let percent = if total > 0 {
            (copied as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        Self {
            percent,
            copied,
            total,
        }
    }
}

/// What happened to a single file of the work set
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FileOutcome {
    /// Copied to a free destination name
    Copied,
    /// Replaced an existing destination file
    Overwritten,
    /// Copied under a generated name
    Renamed(PathBuf),
    /// Left alone because of a skip decision
    Skipped,
    /// The copy failed with the given reason
    Failed(String),
}

/// A file that could not be copied
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FileFailure {
    /// Source file
    pub source: PathBuf,
    /// Intended destination
    pub destination: PathBuf,
    /// Why the copy failed
    pub reason: String,
}

/// Statistics for one copy run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunSummary {
    /// Identifier of the run
    pub run_id: RunId,
    /// When the worker started
    pub started_at: DateTime<Utc>,
    /// Wall time of the run
    pub duration: Duration,
    /// Files in the work set
    pub total_files: u64,
    /// Files processed before the run ended
    pub processed_files: u64,
    /// Files copied to a free name
    pub copied: u64,
    /// Files that replaced an existing one
    pub overwritten: u64,
    /// Files copied under a generated name
    pub renamed: u64,
    /// Files skipped after a collision
    pub skipped: u64,
    /// Files that failed
    pub failures: Vec<FileFailure>,
    /// Whether the run stopped early
    pub cancelled: bool,
}

impl RunSummary {
    /// Create an empty summary for a run over `total_files` files
    pub fn new(run_id: RunId, total_files: u64) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            duration: Duration::ZERO,
            total_files,
            processed_files: 0,
            copied: 0,
            overwritten: 0,
            renamed: 0,
            skipped: 0,
            failures: Vec::new(),
            cancelled: false,
        }
    }

    /// Account for a processed file
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.processed_files += 1;
        match outcome {
            FileOutcome::Copied => self.copied += 1,
            FileOutcome::Overwritten => self.overwritten += 1,
            FileOutcome::Renamed(_) => self.renamed += 1,
            FileOutcome::Skipped => self.skipped += 1,
            // the failure itself is pushed by the caller, it knows the paths
            FileOutcome::Failed(_) => {}
        }
    }

    /// Number of files written to the destination
    pub fn files_written(&self) -> u64 {
        self.copied + self.overwritten + self.renamed
    }

    /// Number of failed files
    pub fn failed(&self) -> u64 {
        self.failures.len() as u64
    }

    /// Whether every file of the work set was processed
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.processed_files == self.total_files
    }
}
