mod commands;
mod config;
mod render;
mod scheduler;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "timetable-sync")]
#[command(about = "Keep a Google Calendar in sync with your ISU timetable")]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the calendar, then keep polling every poll_interval_secs
    Run {
        /// Run a single pass and exit
        #[arg(long)]
        once: bool,
    },
    /// Show pending changes without applying them
    Status,
    /// Authorize access to Google Calendar
    Auth,
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config template
    Init,
    /// Print the config file location
    Path,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Settings::default_path()?,
    };

    match cli.command {
        Commands::Run { once } => commands::run::run(Settings::load(&config_path)?, once).await,
        Commands::Status => commands::status::run(Settings::load(&config_path)?).await,
        Commands::Auth => commands::auth::run().await,
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::config::init(&config_path),
            ConfigAction::Path => {
                commands::config::path(&config_path);
                Ok(())
            }
        },
    }
}
