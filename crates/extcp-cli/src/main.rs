//! extcp - gather files with one extension into a single folder
//!
//! Files are copied from any number of source folders into one destination.
//! Name collisions are resolved interactively: overwrite, rename or skip,
//! optionally for every remaining file, or cancel the run.

mod display;
mod interactive;
mod interrupt;
mod progress;
mod prompt;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use display::{confirmation_question, display_info, display_removed_sources, display_summary};
use extcp_config::{Config, ConfigLoader, LoggingConfig};
use extcp_engine::{CopySession, RunController, RunOptions};
use extcp_types::RunSummary;
use interrupt::Interrupts;
use progress::BarView;
use prompt::ConsoleConflictPrompt;
use std::path::{Path, PathBuf};
use tracing::info;

/// extcp - gather files with one extension into a single folder
#[derive(Parser)]
#[command(
    name = "extcp",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy files with a chosen extension from several folders into one",
    long_about = "extcp copies every file with a chosen extension from one or more source\n\
                  folders into a single destination folder, asking what to do when a file\n\
                  with the same name already exists there."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Verbose mode - detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy matching files from the source folders into the destination
    Copy {
        /// Source folders
        #[arg(required = true)]
        sources: Vec<PathBuf>,
        /// Destination folder
        #[arg(long = "dest")]
        destination: PathBuf,
        /// Extension of the files to copy (default from configuration)
        #[arg(short, long)]
        ext: Option<String>,
        /// Do not ask for confirmation before copying
        #[arg(short, long)]
        yes: bool,
    },
    /// Configure and start copies from a menu
    Interactive,
    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
        /// Write the configuration to a file
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config =
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;

    init_logging(&cli, &config.logging)?;

    info!("extcp v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Copy {
            sources,
            destination,
            ext,
            yes,
        } => {
            let interrupts = Interrupts::install();
            copy_command(&config, &interrupts, sources, destination, ext, yes, cli.quiet).await?;
        }
        Commands::Interactive => {
            let interrupts = Interrupts::install();
            interactive::run(&config, &interrupts, cli.quiet).await?;
        }
        Commands::Config { default, write } => {
            config_command(&config, default, write.as_deref())?;
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli, logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Invalid log filter")?;

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr);

    let installed = if logging.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
    installed.map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

async fn copy_command(
    config: &Config,
    interrupts: &Interrupts,
    sources: Vec<PathBuf>,
    destination: PathBuf,
    ext: Option<String>,
    yes: bool,
    quiet: bool,
) -> Result<()> {
    let mut session = CopySession::new(config.copy.default_extension.clone());
    for source in &sources {
        session.add_source(source);
    }
    session.set_destination(&destination);
    if let Some(ext) = ext {
        session.set_extension(&ext, &config.copy.default_extension)?;
    }

    if !quiet {
        println!(
            "{} Copying {} files from {} folder(s) to {}",
            style("→").green().bold(),
            style(session.extension()).cyan(),
            session.sources().len(),
            style(destination.display()).cyan()
        );
    }

    run_copy(&mut session, config, interrupts, yes, quiet).await?;
    Ok(())
}

/// Validate the session, confirm, and run one copy to completion
///
/// Returns `None` when the user declined the confirmation.
pub(crate) async fn run_copy(
    session: &mut CopySession,
    config: &Config,
    interrupts: &Interrupts,
    assume_yes: bool,
    quiet: bool,
) -> Result<Option<RunSummary>> {
    let plan = session.prepare()?;
    display_removed_sources(&plan.removed_sources);

    if config.copy.confirm_before_copy && !assume_yes {
        let question = confirmation_question(&plan.extension, plan.work_set.len());
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(true)
            .interact()?;
        if !confirmed {
            display_info("Copy aborted");
            return Ok(None);
        }
    }

    let controller = RunController::new(RunOptions {
        poll_interval: config.ui.poll_interval,
        rename_probe_existing: config.copy.rename_probe_existing,
    });

    let armed = interrupts.arm(controller.cancellation_token());
    let mut view = BarView::new(config.ui.progress_bar, quiet);
    let mut prompt = ConsoleConflictPrompt::new(view.bar().clone());
    let outcome = controller.run(plan, &mut prompt, &mut view).await;
    drop(armed);

    let summary = outcome?;
    if !quiet {
        display_summary(&summary);
    }
    Ok(Some(summary))
}

fn config_command(config: &Config, default: bool, write: Option<&Path>) -> Result<()> {
    let (label, shown) = if default {
        ("Default configuration", Config::default())
    } else {
        ("Current configuration", config.clone())
    };

    if let Some(path) = write {
        ConfigLoader::save_to_file(&shown, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        display::display_success(&format!("{} written to {}", label, path.display()));
        return Ok(());
    }

    let rendered = ConfigLoader::render_for(&shown, Path::new("extcp.yaml"))?;
    println!("{} {}:", style("⚙").blue().bold(), label);
    println!("{}", rendered);
    Ok(())
}
