//! Display utilities for the extcp CLI

use console::style;
use extcp_engine::CopySession;
use extcp_types::{Error, ErrorSeverity, Extension, RunSummary};
use std::path::PathBuf;
use std::time::Duration;

/// Display a warning message with proper formatting
pub fn display_warning(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Display an error message with proper formatting
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(message).red());
}

/// Display a success message with proper formatting
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), style(message).green());
}

/// Display an info message with proper formatting
pub fn display_info(message: &str) {
    println!("{} {}", style("ℹ").blue().bold(), style(message).blue());
}

/// Whether a failed operation is something the user fixes from the menu
pub fn is_warning(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<Error>()
        .is_some_and(|error| error.severity() <= ErrorSeverity::Medium)
}

/// Display a failed operation as a warning or an error, by severity
pub fn display_failure(error: &anyhow::Error) {
    if is_warning(error) {
        display_warning(&error.to_string());
    } else {
        display_error(&error.to_string());
    }
}

/// Tell the user which sources were dropped for being the destination
pub fn display_removed_sources(removed: &[PathBuf]) {
    for folder in removed {
        display_warning(&format!(
            "{} is the destination folder and was removed from the sources",
            folder.display()
        ));
    }
}

/// Print the session's current settings
pub fn display_session(session: &CopySession) {
    println!();
    println!("{}", style("Current Settings:").bold().underlined());
    if session.sources().is_empty() {
        println!("  Sources: {}", style("none").dim());
    } else {
        println!("  Sources:");
        for (index, folder) in session.sources().iter().enumerate() {
            println!("    {}. {}", index + 1, style(folder.display()).cyan());
        }
    }
    match session.destination() {
        Some(destination) => println!("  Destination: {}", style(destination.display()).cyan()),
        None => println!("  Destination: {}", style("not set").dim()),
    }
    println!("  Extension: {}", style(session.extension()).cyan());
}

/// Question asked before a run starts
pub fn confirmation_question(extension: &Extension, files: usize) -> String {
    format!("Copy {} file(s) with extension {}?", files, extension)
}

/// Print the statistics of a finished run
pub fn display_summary(summary: &RunSummary) {
    println!();
    let headline = summary_headline(summary);
    if summary.cancelled || summary.failed() > 0 {
        display_warning(&headline);
    } else {
        display_success(&headline);
    }

    println!();
    println!("{}", style("Copy Statistics:").bold().underlined());
    println!("  Files copied: {}", style(summary.copied).green());
    println!("  Files overwritten: {}", style(summary.overwritten).green());
    println!("  Files renamed: {}", style(summary.renamed).green());
    println!("  Files skipped: {}", style(summary.skipped).yellow());
    println!(
        "  Errors: {}",
        if summary.failed() > 0 {
            style(summary.failed()).red()
        } else {
            style(summary.failed()).green()
        }
    );
    println!(
        "  Processed: {}/{}",
        summary.processed_files, summary.total_files
    );
    println!(
        "  Duration: {}",
        style(format_duration(summary.duration)).blue()
    );

    for failure in &summary.failures {
        println!(
            "    {} {}: {}",
            style("✗").red(),
            style(failure.source.display()).dim(),
            failure.reason
        );
    }
}

/// First line of the summary of a finished run
pub fn summary_headline(summary: &RunSummary) -> String {
    if summary.cancelled {
        format!(
            "Copy cancelled after {} of {} file(s)",
            summary.processed_files, summary.total_files
        )
    } else if summary.failed() > 0 {
        format!("Copy finished with {} error(s)", summary.failed())
    } else {
        "Files copied successfully!".to_string()
    }
}

/// Format duration in human-readable format
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{:.2}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
