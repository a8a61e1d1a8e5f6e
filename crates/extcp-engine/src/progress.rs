//! Progress channel between the copy worker and the interactive side

use extcp_types::{FileFailure, ProgressUpdate, RunSummary};
use tokio::sync::mpsc;
use tracing::debug;

/// Event sent by the worker
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// One more file of the work set was processed
    Update(ProgressUpdate),
    /// A file could not be copied; the run goes on
    FileFailed(FileFailure),
    /// Last event of a run
    Finished(RunSummary),
}

impl ProgressEvent {
    /// Whether no event will follow this one
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Worker-side sender of progress events
///
/// [`ProgressReporter::finish`] consumes the reporter, so a run emits its
/// terminal event exactly once.
#[derive(Debug)]
pub struct ProgressReporter {
    event_tx: mpsc::UnboundedSender<ProgressEvent>,
    event_rx: Option<mpsc::UnboundedReceiver<ProgressEvent>>,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            event_tx,
            event_rx: Some(event_rx),
        }
    }

    /// Take the event receiver (can only be called once)
    pub fn take_event_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<ProgressEvent>> {
        self.event_rx.take()
    }

    /// Report a processed file
    pub fn update(&self, update: ProgressUpdate) {
        self.send(ProgressEvent::Update(update));
    }

    /// Report a failed file
    pub fn file_failed(&self, failure: FileFailure) {
        self.send(ProgressEvent::FileFailed(failure));
    }

    /// Report the end of the run
    pub fn finish(self, summary: RunSummary) {
        self.send(ProgressEvent::Finished(summary));
    }

    fn send(&self, event: ProgressEvent) {
        // a closed receiver only means nobody is watching any more
        if self.event_tx.send(event).is_err() {
            debug!("Progress receiver dropped, event discarded");
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
