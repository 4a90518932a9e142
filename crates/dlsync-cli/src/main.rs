//! dlsync CLI
//!
//! The command-line interface for reconciling a media server's download
//! clients against a `dlsync.toml` file.

mod cli;
mod commands;
mod config;
mod error;
mod logging;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow(), e);
    }
    tracing::debug!("Verbose mode enabled");

    execute_command(cli).await
}

async fn execute_command(cli: Cli) -> Result<()> {
    let api_key = cli.api_key.as_deref();

    match cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "dlsync", &mut std::io::stdout());
            Ok(())
        }
        Commands::Diff { json } => {
            let config = Config::load(&cli.config)?;
            commands::run_diff(&config, api_key, json).await
        }
        Commands::Sync { dry_run, json } => {
            let config = Config::load(&cli.config)?;
            commands::run_sync(&config, api_key, dry_run, json).await
        }
    }
}
