//! Terminal progress rendering

use console::style;
use extcp_engine::ProgressView;
use extcp_types::{FileFailure, ProgressUpdate, RunSummary};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

const BAR_TEMPLATE: &str = "{spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} {msg}";

/// Progress bar fed by the run controller
pub struct BarView {
    progress_bar: ProgressBar,
    quiet: bool,
}

impl BarView {
    /// Create a view; hidden when `quiet` or when bars are disabled
    pub fn new(show_bar: bool, quiet: bool) -> Self {
        let progress_bar = if show_bar && !quiet {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };

        match ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            Ok(bar_style) => progress_bar.set_style(bar_style.progress_chars("█▉▊▋▌▍▎▏  ")),
            Err(e) => debug!("Falling back to the default progress style: {}", e),
        }

        Self {
            progress_bar,
            quiet,
        }
    }

    /// Progress bar, for suspending it around prompts
    pub fn bar(&self) -> &ProgressBar {
        &self.progress_bar
    }
}

impl ProgressView for BarView {
    fn start(&mut self, total: u64) {
        self.progress_bar.set_length(total);
        self.progress_bar.set_position(0);
        self.progress_bar
            .enable_steady_tick(Duration::from_millis(100));
    }

    fn update(&mut self, update: &ProgressUpdate) {
        self.progress_bar.set_length(update.total);
        self.progress_bar.set_position(update.copied);
        self.progress_bar
            .set_message(format!("{:.0}%", update.percent));
    }

    fn file_failed(&mut self, failure: &FileFailure) {
        if self.quiet {
            return;
        }
        let message = format!("{}: {}", failure.source.display(), failure.reason);
        self.progress_bar.suspend(|| {
            println!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
        });
    }

    fn finish(&mut self, summary: &RunSummary) {
        if summary.cancelled {
            self.progress_bar.abandon_with_message("cancelled");
        } else {
            self.progress_bar.finish_with_message("done");
        }
    }
}
