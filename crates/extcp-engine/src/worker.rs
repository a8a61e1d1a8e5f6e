//! Background copy worker
//!
//! The worker walks the work set in order, resolves collisions through the
//! run's [`ConflictResolver`] and reports one progress update per processed
//! file. It runs on a blocking thread and never touches the terminal.

use crate::conflict::{ConflictResolver, DecisionSource};
use crate::enumerator::WorkSet;
use crate::progress::ProgressReporter;
use crate::rename::RenameSequencer;
use extcp_types::{
    ConflictAction, Error, FileFailure, FileOutcome, ProgressUpdate, RunId, RunSummary,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Counters of a run in progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    /// Files in the work set
    pub total_files: u64,
    /// Files processed so far, including skipped and failed ones
    pub copied_files: u64,
    /// Set once the run is cancelled; never cleared
    pub cancelled: bool,
}

impl RunState {
    fn new(total_files: u64) -> Self {
        Self {
            total_files,
            ..Self::default()
        }
    }

    fn advance(&mut self) -> ProgressUpdate {
        self.copied_files += 1;
        ProgressUpdate::new(self.copied_files, self.total_files)
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}

/// Copies the files of one run
pub struct CopyWorker<D> {
    run_id: RunId,
    work_set: WorkSet,
    destination: PathBuf,
    resolver: ConflictResolver<D>,
    sequencer: RenameSequencer,
    reporter: ProgressReporter,
    cancel: CancellationToken,
}

impl<D: DecisionSource> CopyWorker<D> {
    /// Create a worker for `work_set`
    pub fn new(
        work_set: WorkSet,
        destination: PathBuf,
        decisions: D,
        reporter: ProgressReporter,
    ) -> Self {
        Self {
            run_id: RunId::new_v4(),
            work_set,
            destination,
            resolver: ConflictResolver::new(decisions),
            sequencer: RenameSequencer::new(),
            reporter,
            cancel: CancellationToken::new(),
        }
    }

    /// Probe the destination when generating rename targets
    pub fn with_rename_probe(mut self, probe_existing: bool) -> Self {
        self.sequencer = RenameSequencer::new().with_probe_existing(probe_existing);
        self
    }

    /// Stop between files when `cancel` is triggered
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Identifier of the run
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Process the whole work set and emit the terminal event
    pub fn run(mut self) -> RunSummary {
        let started = Instant::now();
        let total = self.work_set.len() as u64;
        let mut state = RunState::new(total);
        let mut summary = RunSummary::new(self.run_id, total);

        info!(
            "Run {} started: {} file(s) to {}",
            self.run_id,
            total,
            self.destination.display()
        );

        let work_set = std::mem::take(&mut self.work_set);
        for source in &work_set {
            if self.cancel.is_cancelled() {
                info!("Run {} cancelled by request", self.run_id);
                state.cancel();
                break;
            }

            let Some(outcome) = self.process(source) else {
                info!("Run {} cancelled at '{}'", self.run_id, source.display());
                state.cancel();
                break;
            };

            if let FileOutcome::Failed(reason) = &outcome {
                let failure = FileFailure {
                    source: source.clone(),
                    destination: self.target_for(source),
                    reason: reason.clone(),
                };
                self.reporter.file_failed(failure.clone());
                summary.failures.push(failure);
            }
            summary.record(&outcome);
            self.reporter.update(state.advance());
        }

        summary.cancelled = state.cancelled;
        summary.duration = started.elapsed();
        info!(
            "Run {} finished: {}/{} processed, {} written, {} failed",
            self.run_id,
            summary.processed_files,
            summary.total_files,
            summary.files_written(),
            summary.failed()
        );

        self.reporter.finish(summary.clone());
        summary
    }

    /// Handle one file; `None` means the user cancelled the run
    fn process(&mut self, source: &Path) -> Option<FileOutcome> {
        let Some(file_name) = source.file_name() else {
            return Some(FileOutcome::Failed(format!(
                "Not a file path: {}",
                source.display()
            )));
        };
        // shown to the user; the copy itself keeps the raw name
        let display_name = file_name.to_string_lossy();

        if let Err(e) = fs::create_dir_all(&self.destination) {
            let error = Error::from_io(&e, &self.destination);
            warn!("Cannot create destination: {}", error);
            return Some(FileOutcome::Failed(error.to_string()));
        }

        let target = self.destination.join(file_name);
        if !target.exists() {
            return Some(copy_file(source, &target, FileOutcome::Copied));
        }

        match self.resolver.resolve(&display_name) {
            ConflictAction::Overwrite => {
                Some(copy_file(source, &target, FileOutcome::Overwritten))
            }
            ConflictAction::Rename => {
                let renamed = self.sequencer.next_path(&self.destination, file_name);
                debug!("'{}' renamed to {}", display_name, renamed.display());
                Some(copy_file(
                    source,
                    &renamed,
                    FileOutcome::Renamed(renamed.clone()),
                ))
            }
            ConflictAction::Skip => {
                debug!("'{}' skipped", display_name);
                Some(FileOutcome::Skipped)
            }
            ConflictAction::Cancel => None,
        }
    }

    fn target_for(&self, source: &Path) -> PathBuf {
        match source.file_name() {
            Some(name) => self.destination.join(name),
            None => self.destination.clone(),
        }
    }
}

fn copy_file(source: &Path, target: &Path, success: FileOutcome) -> FileOutcome {
    match fs::copy(source, target) {
        Ok(bytes) => {
            debug!(
                "Copied {} -> {} ({} bytes)",
                source.display(),
                target.display(),
                bytes
            );
            success
        }
        Err(e) => {
            let blamed = if source.exists() { target } else { source };
            let error = Error::from_io(&e, blamed);
            warn!("Failed to copy {}: {}", source.display(), error);
            FileOutcome::Failed(error.to_string())
        }
    }
}
