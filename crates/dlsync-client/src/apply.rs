//! Applying a reconciliation diff to the server
//!
//! Creates run first, then updates, then deletes. A failing action is
//! recorded and the remaining actions still run.

use dlsync_core::ReconcileDiff;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::DownloadClientWriter;
use crate::error::Error;

/// Options for applying a diff
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// If true, report what would change without calling the server.
    /// Actions will be prefixed with "[dry-run] Would ..."
    pub dry_run: bool,
    /// Delete server download clients that are not declared
    pub delete_unmanaged: bool,
}

/// Report from applying a diff
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyReport {
    /// Whether every attempted action succeeded
    pub success: bool,
    /// Actions taken (or that would be taken in dry-run mode)
    pub actions: Vec<String>,
    /// Unmanaged clients left in place because deletion is disabled
    pub skipped: Vec<String>,
    /// Errors encountered, one per failed action
    pub errors: Vec<String>,
}

impl ApplyReport {
    /// Create a successful, empty report
    pub fn success() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    fn record(&mut self, result: Result<String, String>) {
        match result {
            Ok(action) => {
                info!("{}", action);
                self.actions.push(action);
            }
            Err(error) => {
                warn!("{}", error);
                self.success = false;
                self.errors.push(error);
            }
        }
    }
}

/// Apply `diff` through `writer`
pub async fn apply_diff<W>(writer: &W, diff: &ReconcileDiff, options: &ApplyOptions) -> ApplyReport
where
    W: DownloadClientWriter + ?Sized,
{
    let mut report = ApplyReport::success();

    for entry in &diff.missing_on_server {
        let label = format!("download client '{}' ({})", entry.name, entry.implementation);
        if options.dry_run {
            report.record(Ok(format!("[dry-run] Would create {}", label)));
            continue;
        }
        let result = match writer.create(entry).await {
            Ok(created) => Ok(format!("Created {} with id {}", label, created.id)),
            Err(e) => Err(format!("Failed to create {}: {}", label, e)),
        };
        report.record(result);
    }

    for change in &diff.changed {
        let label = format!("download client '{}' (id {})", change.payload.name, change.id);
        let Ok(id) = change.id.parse::<i64>() else {
            let error = Error::InvalidId {
                id: change.id.clone(),
            };
            report.record(Err(format!("Failed to update {}: {}", label, error)));
            continue;
        };
        if options.dry_run {
            report.record(Ok(format!("[dry-run] Would update {}", label)));
            continue;
        }
        let result = match writer.update(id, &change.payload).await {
            Ok(_) => Ok(format!("Updated {}", label)),
            Err(e) => Err(format!("Failed to update {}: {}", label, e)),
        };
        report.record(result);
    }

    for record in &diff.not_available_anymore {
        let label = format!("download client '{}' (id {})", record.name, record.id);
        if !options.delete_unmanaged {
            report.skipped.push(format!("Kept unmanaged {}", label));
            continue;
        }
        if options.dry_run {
            report.record(Ok(format!("[dry-run] Would delete {}", label)));
            continue;
        }
        let result = match writer.delete(record.id).await {
            Ok(()) => Ok(format!("Deleted {}", label)),
            Err(e) => Err(format!("Failed to delete {}: {}", label, e)),
        };
        report.record(result);
    }

    report
}
