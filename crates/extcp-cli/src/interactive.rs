//! Menu-driven session
//!
//! Sources, destination and extension persist between runs, so several copies
//! can be started from the same settings.

use crate::display::{
    display_failure, display_info, display_session, display_success, display_warning,
};
use crate::interrupt::Interrupts;
use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use extcp_config::Config;
use extcp_engine::CopySession;
use std::path::PathBuf;
use tracing::debug;

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    AddSource,
    RemoveSource,
    SetDestination,
    SetExtension,
    StartCopy,
    ShowSettings,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 7] = [
        Self::AddSource,
        Self::RemoveSource,
        Self::SetDestination,
        Self::SetExtension,
        Self::StartCopy,
        Self::ShowSettings,
        Self::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::AddSource => "Add source folder",
            Self::RemoveSource => "Remove source folder",
            Self::SetDestination => "Set destination folder",
            Self::SetExtension => "Set file extension",
            Self::StartCopy => "Start copy",
            Self::ShowSettings => "Show settings",
            Self::Quit => "Quit",
        }
    }
}

/// Run the menu until the user quits
pub async fn run(config: &Config, interrupts: &Interrupts, quiet: bool) -> Result<()> {
    let mut session = CopySession::new(config.copy.default_extension.clone());
    println!(
        "{} {}",
        style("extcp").bold(),
        style("- copy files by extension").dim()
    );

    loop {
        let action = select_action()?;
        debug!("Menu action: {:?}", action);

        match action {
            MenuAction::AddSource => add_source(&mut session)?,
            MenuAction::RemoveSource => remove_source(&mut session)?,
            MenuAction::SetDestination => {
                if let Some(folder) = ask_path("Destination folder")? {
                    session.set_destination(&folder);
                    display_success(&format!("Destination set to {}", folder.display()));
                }
            }
            MenuAction::SetExtension => set_extension(&mut session, config)?,
            MenuAction::StartCopy => {
                if let Err(e) = crate::run_copy(&mut session, config, interrupts, false, quiet).await
                {
                    display_failure(&e);
                }
            }
            MenuAction::ShowSettings => display_session(&session),
            MenuAction::Quit => break,
        }
    }

    Ok(())
}

fn select_action() -> Result<MenuAction> {
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose an action")
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(selection
        .and_then(|index| MenuAction::ALL.get(index).copied())
        .unwrap_or(MenuAction::Quit))
}

fn ask_path(prompt: &str) -> Result<Option<PathBuf>> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    let trimmed = input.trim();
    Ok((!trimmed.is_empty()).then(|| PathBuf::from(trimmed)))
}

fn add_source(session: &mut CopySession) -> Result<()> {
    let Some(folder) = ask_path("Source folder")? else {
        return Ok(());
    };

    if !folder.is_dir() {
        display_warning(&format!("{} is not a folder", folder.display()));
    } else if session.add_source(&folder) {
        display_success(&format!("Added {}", folder.display()));
    } else {
        display_info(&format!("{} is already a source folder", folder.display()));
    }
    Ok(())
}

fn remove_source(session: &mut CopySession) -> Result<()> {
    if session.sources().is_empty() {
        display_info("No source folders to remove");
        return Ok(());
    }

    let labels: Vec<String> = session
        .sources()
        .iter()
        .map(|folder| folder.display().to_string())
        .collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Folder to remove")
        .items(&labels)
        .default(0)
        .interact_opt()?;

    if let Some(removed) = selection.and_then(|index| session.remove_source_at(index)) {
        display_success(&format!("Removed {}", removed.display()));
    }
    Ok(())
}

fn set_extension(session: &mut CopySession, config: &Config) -> Result<()> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "File extension (empty for {})",
            config.copy.default_extension
        ))
        .allow_empty(true)
        .interact_text()?;

    match session.set_extension(&input, &config.copy.default_extension) {
        Ok(()) => display_success(&format!("Extension set to {}", session.extension())),
        Err(e) => display_failure(&anyhow::Error::from(e)),
    }
    Ok(())
}
