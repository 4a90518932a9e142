//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// dlsync - Keep a media server's download clients in line with a config file
#[derive(Parser, Debug)]
#[command(name = "dlsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true, env = "DLSYNC_CONFIG", default_value = "dlsync.toml")]
    pub config: PathBuf,

    /// Server API key (overrides the config file)
    #[arg(long, global = true, env = "DLSYNC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show what sync would change on the server
    ///
    /// Examples:
    ///   dlsync diff                  # Human-readable summary
    ///   dlsync diff --json           # Machine-readable diff (null when in sync)
    Diff {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Create, update and remove download clients on the server
    Sync {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for CI/CD integration
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
