//! Interactive side of a run
//!
//! The [`RunController`] spawns the [`CopyWorker`] on the blocking pool, then
//! ticks on a fixed interval. Each tick answers pending collision requests
//! through a [`ConflictPrompt`] and drains progress events into a
//! [`ProgressView`], until the terminal event arrives.

use crate::conflict::{ChannelDecisions, ConflictRequest};
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::session::RunPlan;
use crate::worker::CopyWorker;
use async_trait::async_trait;
use extcp_types::{
    ConflictChoice, Error, FileFailure, PollInterval, ProgressUpdate, Result, RunSummary,
};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Asks the user what to do with a colliding file
#[async_trait]
pub trait ConflictPrompt: Send {
    /// Choose one of the seven answers for `file_name`
    async fn choose(&mut self, file_name: &str) -> ConflictChoice;
}

/// Renders the progress of a run
pub trait ProgressView: Send {
    /// Called once before the worker starts
    fn start(&mut self, _total: u64) {}

    /// Called for every processed file, in order
    fn update(&mut self, update: &ProgressUpdate);

    /// Called when a file could not be copied
    fn file_failed(&mut self, _failure: &FileFailure) {}

    /// Called once with the final summary
    fn finish(&mut self, _summary: &RunSummary) {}
}

/// Knobs of a run that come from configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Interval between two polls of the channels
    pub poll_interval: PollInterval,
    /// Skip rename targets that already exist
    pub rename_probe_existing: bool,
}

/// Drives one run at a time from the interactive side
#[derive(Debug, Clone)]
pub struct RunController {
    options: RunOptions,
    cancel: CancellationToken,
}

impl RunController {
    /// Create a controller
    pub fn new(options: RunOptions) -> Self {
        Self {
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops the current run between two files
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Request the current run to stop
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Run `plan` to completion
    ///
    /// A cancelled run is not an error; check [`RunSummary::cancelled`].
    pub async fn run<P, V>(
        &self,
        plan: RunPlan,
        prompt: &mut P,
        view: &mut V,
    ) -> Result<RunSummary>
    where
        P: ConflictPrompt + ?Sized,
        V: ProgressView + ?Sized,
    {
        let mut reporter = ProgressReporter::new();
        let mut events = reporter
            .take_event_receiver()
            .ok_or_else(|| Error::channel("Progress receiver already taken"))?;
        let (decisions, mut requests) = ChannelDecisions::channel();

        let total = plan.work_set.len() as u64;
        let worker = CopyWorker::new(plan.work_set, plan.destination, decisions, reporter)
            .with_rename_probe(self.options.rename_probe_existing)
            .with_cancellation(self.cancel.clone());
        let run_id = worker.run_id();

        info!("Starting run {} with extension {}", run_id, plan.extension);
        view.start(total);
        let handle = tokio::task::spawn_blocking(move || worker.run());

        let mut ticker = tokio::time::interval(self.options.poll_interval.as_duration());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            answer_pending(&mut requests, prompt).await;

            loop {
                match events.try_recv() {
                    Ok(ProgressEvent::Update(update)) => view.update(&update),
                    Ok(ProgressEvent::FileFailed(failure)) => view.file_failed(&failure),
                    Ok(ProgressEvent::Finished(summary)) => {
                        view.finish(&summary);
                        join_worker(handle).await?;
                        debug!("Run {} drained", run_id);
                        return Ok(summary);
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        join_worker(handle).await?;
                        return Err(Error::channel(format!(
                            "Run {} ended without a final report",
                            run_id
                        )));
                    }
                }
            }
        }
    }
}

async fn answer_pending<P>(requests: &mut mpsc::Receiver<ConflictRequest>, prompt: &mut P)
where
    P: ConflictPrompt + ?Sized,
{
    while let Ok(request) = requests.try_recv() {
        let choice = prompt.choose(&request.file_name).await;
        debug!("Answering '{}' with {}", request.file_name, choice);
        request.answer(choice);
    }
}

async fn join_worker(handle: JoinHandle<RunSummary>) -> Result<RunSummary> {
    handle.await.map_err(|e| {
        error!("Copy worker failed: {}", e);
        Error::channel(format!("Copy worker failed: {}", e))
    })
}
