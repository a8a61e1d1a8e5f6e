//! Console conflict prompt

use async_trait::async_trait;
use console::style;
use dialoguer::{theme::ColorfulTheme, Select};
use extcp_engine::ConflictPrompt;
use extcp_types::ConflictChoice;
use indicatif::ProgressBar;
use tracing::warn;

/// Asks the user about each collision with a selection menu
pub struct ConsoleConflictPrompt {
    progress_bar: ProgressBar,
}

impl ConsoleConflictPrompt {
    /// Create a prompt that suspends `progress_bar` while asking
    pub fn new(progress_bar: ProgressBar) -> Self {
        Self { progress_bar }
    }
}

#[async_trait]
impl ConflictPrompt for ConsoleConflictPrompt {
    async fn choose(&mut self, file_name: &str) -> ConflictChoice {
        let file_name = file_name.to_string();
        let progress_bar = self.progress_bar.clone();

        let answer = tokio::task::spawn_blocking(move || {
            progress_bar.suspend(|| ask(&file_name))
        })
        .await;

        match answer {
            Ok(choice) => choice,
            Err(e) => {
                warn!("Conflict prompt failed: {}", e);
                ConflictChoice::Cancel
            }
        }
    }
}

fn ask(file_name: &str) -> ConflictChoice {
    let labels: Vec<&str> = ConflictChoice::ALL.iter().map(|c| c.label()).collect();

    println!();
    println!(
        "{} File {} already exists in the destination folder.",
        style("⚠").yellow().bold(),
        style(file_name).cyan()
    );

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What do you want to do?")
        .items(&labels)
        .default(0)
        .interact_opt();

    match selection {
        Ok(Some(index)) => ConflictChoice::ALL
            .get(index)
            .copied()
            .unwrap_or(ConflictChoice::Cancel),
        // escape cancels the run
        Ok(None) => ConflictChoice::Cancel,
        Err(e) => {
            warn!("Cannot read the answer for '{}': {}", file_name, e);
            ConflictChoice::Cancel
        }
    }
}
