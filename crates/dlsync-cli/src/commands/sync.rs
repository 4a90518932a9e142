//! Sync command implementation
//!
//! Reconciles the configured download clients and applies the result.

use colored::Colorize;
use dlsync_client::{ApplyOptions, ApplyReport, apply_diff};
use serde_json::json;

use super::connect;
use crate::config::Config;
use crate::error::{CliError, Result};

/// Run the sync command
///
/// Fails after printing the report if any action failed.
pub async fn run_sync(
    config: &Config,
    api_key: Option<&str>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let reconciler = connect(config, api_key)?;

    if !json {
        println!(
            "{} Syncing download clients with {}...",
            "=>".blue().bold(),
            config.server.url.yellow()
        );
    }

    let report = match reconciler.reconcile(&config.download_clients).await? {
        Some(diff) => {
            let options = ApplyOptions {
                dry_run,
                delete_unmanaged: config.reconcile.delete_unmanaged,
            };
            apply_diff(reconciler.provider(), &diff, &options).await
        }
        None => ApplyReport::success(),
    };

    if json {
        let output = json!({
            "dry_run": dry_run,
            "success": report.success,
            "actions": report.actions,
            "skipped": report.skipped,
            "errors": report.errors,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&report, dry_run);
    }

    if !report.success {
        return Err(CliError::user(format!(
            "Sync finished with {} error(s)",
            report.errors.len()
        )));
    }

    Ok(())
}

/// Nothing was changed and no unmanaged client was left behind
fn already_in_sync(report: &ApplyReport) -> bool {
    report.actions.is_empty() && report.skipped.is_empty() && report.errors.is_empty()
}

fn print_report(report: &ApplyReport, dry_run: bool) {
    if already_in_sync(report) {
        println!(
            "{} Download clients are already in sync.",
            "OK".green().bold()
        );
    } else if report.actions.is_empty() && report.errors.is_empty() {
        println!(
            "{} No changes applied; {} unmanaged download client(s) kept.",
            "OK".green().bold(),
            report.skipped.len()
        );
    }

    for action in &report.actions {
        println!("   {} {}", "+".green(), action);
    }

    for skipped in &report.skipped {
        println!("   {} {}", "-".dimmed(), skipped.dimmed());
    }

    if !report.errors.is_empty() {
        println!();
        println!("{}", "Errors:".red().bold());
        for error in &report.errors {
            println!("   {} {}", "!".red(), error);
        }
        return;
    }

    if dry_run && !report.actions.is_empty() {
        println!();
        println!("Run {} to apply these changes.", "dlsync sync".cyan());
    } else if !report.actions.is_empty() {
        println!("{} Sync complete.", "OK".green().bold());
    }
}
