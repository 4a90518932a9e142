//! Diff command implementation
//!
//! Previews what sync would change without touching the server.

use colored::Colorize;
use dlsync_core::ReconcileDiff;

use super::connect;
use crate::config::Config;
use crate::error::Result;

/// Run the diff command
///
/// With `json`, prints the diff as the server-shaped JSON object, or `null`
/// when nothing needs to change.
pub async fn run_diff(config: &Config, api_key: Option<&str>, json: bool) -> Result<()> {
    let reconciler = connect(config, api_key)?;
    let diff = reconciler.reconcile(&config.download_clients).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        print_diff_output(diff.as_ref(), &config.server.url, config.reconcile.delete_unmanaged);
    }

    Ok(())
}

/// Print human-readable diff-style output
pub fn print_diff_output(diff: Option<&ReconcileDiff>, url: &str, delete_unmanaged: bool) {
    let Some(diff) = diff else {
        println!(
            "{} No changes needed. Download clients are in sync.",
            "OK".green().bold()
        );
        return;
    };

    println!("{} {}", "Diff".blue().bold(), url.yellow());
    println!();

    for entry in &diff.missing_on_server {
        let line = format!("create {} ({})", entry.name, entry.implementation);
        println!("  {} {}", "+".green(), line.green());
    }

    for change in &diff.changed {
        let line = format!(
            "update {} ({}, id {})",
            change.payload.name, change.payload.implementation, change.id
        );
        println!("  {} {}", "~".yellow(), line.yellow());
    }

    for record in &diff.not_available_anymore {
        let line = format!(
            "remove {} ({}, id {})",
            record.name, record.implementation, record.id
        );
        if delete_unmanaged {
            println!("  {} {}", "-".red(), line.red());
        } else {
            println!(
                "  {} {} {}",
                "-".dimmed(),
                line.dimmed(),
                "(kept: delete_unmanaged is off)".dimmed()
            );
        }
    }

    println!();
    println!("Run {} to apply these changes.", "dlsync sync".cyan());
}
