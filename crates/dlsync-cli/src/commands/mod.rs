//! Command implementations for dlsync-cli

pub mod diff;
pub mod sync;

pub use diff::run_diff;
pub use sync::run_sync;

use dlsync_client::DownloadClientApi;
use dlsync_core::Reconciler;

use crate::config::Config;
use crate::error::{CliError, Result};

/// Build a reconciler talking to the configured server
///
/// An api key given on the command line or through the environment wins
/// over the one in the config file.
pub fn connect(config: &Config, api_key: Option<&str>) -> Result<Reconciler<DownloadClientApi>> {
    let mut server = config.server.clone();
    if let Some(key) = api_key {
        server.api_key = Some(key.to_string());
    }

    if server.api_key.as_deref().is_none_or(str::is_empty) {
        return Err(CliError::user(
            "No API key configured. Set server.api_key, DLSYNC_API_KEY or --api-key.",
        ));
    }

    tracing::debug!(server = ?server, "Connecting to server");
    let api = DownloadClientApi::new(&server)?;

    Ok(Reconciler::new(api).with_sensitive_fields(config.sensitive_fields()))
}
