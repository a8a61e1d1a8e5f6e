//! Conflict resolution for colliding destination names
//!
//! Each run owns one [`ConflictResolver`]. Its "apply to all" latches are
//! consulted before the user is asked, in the order skip, overwrite, rename.
//! Latches only ever go from `false` to `true` within a run.

use extcp_types::{ConflictAction, ConflictChoice};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Source of user decisions for colliding files
///
/// Returning `None` means nobody can answer any more; the collision is then
/// treated as a cancel.
pub trait DecisionSource {
    /// Ask for a decision about `file_name`, blocking until it is given
    fn decide(&mut self, file_name: &str) -> Option<ConflictChoice>;
}

/// The three "apply to all remaining" latches of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConflictFlags {
    /// Overwrite every later collision
    pub overwrite_all: bool,
    /// Rename every later collision
    pub rename_all: bool,
    /// Skip every later collision
    pub skip_all: bool,
}

impl ConflictFlags {
    /// Action forced by a latch, if any
    pub fn latched_action(&self) -> Option<ConflictAction> {
        if self.skip_all {
            Some(ConflictAction::Skip)
        } else if self.overwrite_all {
            Some(ConflictAction::Overwrite)
        } else if self.rename_all {
            Some(ConflictAction::Rename)
        } else {
            None
        }
    }

    /// Set the latch matching an "-all" choice
    pub fn latch(&mut self, choice: ConflictChoice) {
        match choice {
            ConflictChoice::OverwriteAll => self.overwrite_all = true,
            ConflictChoice::RenameAll => self.rename_all = true,
            ConflictChoice::SkipAll => self.skip_all = true,
            _ => {}
        }
    }
}

/// Decides what to do with each colliding file of a run
#[derive(Debug)]
pub struct ConflictResolver<D> {
    flags: ConflictFlags,
    source: D,
}

impl<D: DecisionSource> ConflictResolver<D> {
    /// Create a resolver with all latches cleared
    pub fn new(source: D) -> Self {
        Self {
            flags: ConflictFlags::default(),
            source,
        }
    }

    /// Resolve a collision on `file_name`
    pub fn resolve(&mut self, file_name: &str) -> ConflictAction {
        if let Some(action) = self.flags.latched_action() {
            debug!("'{}' resolved by latch: {:?}", file_name, action);
            return action;
        }

        let choice = self.source.decide(file_name).unwrap_or_else(|| {
            warn!("No answer for '{}', cancelling the run", file_name);
            ConflictChoice::Cancel
        });

        if choice.applies_to_all() {
            info!("'{}' chosen for all remaining collisions", choice);
        }
        self.flags.latch(choice);

        debug!("'{}' resolved by user: {}", file_name, choice);
        choice.action()
    }
}

/// A collision waiting for an answer from the interactive side
#[derive(Debug)]
pub struct ConflictRequest {
    /// Name of the file that already exists in the destination
    pub file_name: String,
    reply: oneshot::Sender<ConflictChoice>,
}

impl ConflictRequest {
    /// Send the user's answer back to the worker
    pub fn answer(self, choice: ConflictChoice) {
        if self.reply.send(choice).is_err() {
            warn!("Worker stopped before '{}' was answered", self.file_name);
        }
    }
}

/// Worker-side half of the conflict handoff
///
/// Each decision posts a [`ConflictRequest`] and blocks the worker thread on
/// the reply. Must not be used from inside an async context.
#[derive(Debug, Clone)]
pub struct ChannelDecisions {
    requests: mpsc::Sender<ConflictRequest>,
}

impl ChannelDecisions {
    /// Create the handoff; the receiver belongs to the interactive side
    pub fn channel() -> (Self, mpsc::Receiver<ConflictRequest>) {
        let (requests, receiver) = mpsc::channel(1);
        (Self { requests }, receiver)
    }
}

impl DecisionSource for ChannelDecisions {
    fn decide(&mut self, file_name: &str) -> Option<ConflictChoice> {
        let (reply, answer) = oneshot::channel();
        let request = ConflictRequest {
            file_name: file_name.to_string(),
            reply,
        };
        self.requests.blocking_send(request).ok()?;
        answer.blocking_recv().ok()
    }
}
