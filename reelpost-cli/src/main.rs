//! Reelpost CLI - Command-line interface
//!
//! Runs the server, or searches and posts titles directly from a terminal.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use reelpost_core::tracing_setup::{CliLogLevel, init_tracing};
use tracing::debug;

#[derive(Parser)]
#[command(name = "reelpost")]
#[command(about = "Search TMDB and repost titles to a Telegram channel")]
struct Cli {
    /// Console log level
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,

    /// Directory receiving the full trace log of the last run
    #[arg(long, global = true, default_value = "logs")]
    logs_dir: PathBuf,

    /// Log to the console only
    #[arg(long, global = true)]
    no_log_file: bool,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = dotenvy::dotenv();
    let cli = Cli::parse();

    let logs_dir = (!cli.no_log_file).then_some(cli.logs_dir.as_path());
    init_tracing(cli.log_level.as_tracing_level(), logs_dir)
        .context("failed to initialize logging")?;

    if let Ok(path) = env_file {
        debug!(path = %path.display(), "Loaded environment file");
    }

    commands::handle_command(cli.command).await
}
