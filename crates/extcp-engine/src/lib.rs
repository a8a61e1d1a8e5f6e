//! Copy engine for extcp
//!
//! This crate gathers files with one extension from several folders into a
//! single destination:
//!
//! - **Enumeration**: non-recursive, three-variant suffix match, de-duplicated
//! - **Conflict Resolution**: per-file decisions with "apply to all" latches
//! - **Renaming**: `name(N).ext` with a counter per base name
//! - **Background Copying**: one worker thread per run with cooperative cancel
//! - **Progress Tracking**: ordered updates followed by one final summary
//!
//! # Examples
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use extcp_engine::{ConflictPrompt, CopySession, ProgressView, RunController, RunOptions};
//! use extcp_types::{ConflictChoice, Extension, ProgressUpdate};
//!
//! struct AlwaysSkip;
//!
//! #[async_trait]
//! impl ConflictPrompt for AlwaysSkip {
//!     async fn choose(&mut self, _file_name: &str) -> ConflictChoice {
//!         ConflictChoice::SkipAll
//!     }
//! }
//!
//! struct Print;
//!
//! impl ProgressView for Print {
//!     fn update(&mut self, update: &ProgressUpdate) {
//!         println!("{:.0}% ({}/{})", update.percent, update.copied, update.total);
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = CopySession::new(Extension::parse("jpg")?);
//! session.add_source("camera");
//! session.set_destination("photos");
//!
//! let plan = session.prepare()?;
//! let summary = RunController::new(RunOptions::default())
//!     .run(plan, &mut AlwaysSkip, &mut Print)
//!     .await?;
//! println!("{} file(s) written", summary.files_written());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod conflict;
pub mod controller;
pub mod enumerator;
pub mod progress;
pub mod rename;
pub mod session;
pub mod worker;

pub use conflict::{
    ChannelDecisions, ConflictFlags, ConflictRequest, ConflictResolver, DecisionSource,
};
pub use controller::{ConflictPrompt, ProgressView, RunController, RunOptions};
pub use enumerator::{FileEnumerator, WorkSet};
pub use progress::{ProgressEvent, ProgressReporter};
pub use rename::RenameSequencer;
pub use session::{CopySession, RunPlan};
pub use worker::{CopyWorker, RunState};
