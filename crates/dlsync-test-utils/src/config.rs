//! [`TestConfig`] writer for CLI test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a `dlsync.toml`.
///
/// # Example
///
/// ```rust,no_run
/// use dlsync_test_utils::config::TestConfig;
///
/// let config = TestConfig::new("http://127.0.0.1:8989")
///     .with_download_clients(r#"
/// [[download_clients]]
/// name = "qb"
/// implementation = "QBittorrent"
/// "#);
/// assert!(config.path().exists());
/// ```
pub struct TestConfig {
    temp_dir: TempDir,
    server_url: String,
    api_key: Option<String>,
    reconcile: String,
    download_clients: String,
}

impl TestConfig {
    /// Write a config pointing at `server_url` with api key `test-key`.
    pub fn new(server_url: &str) -> Self {
        let config = Self {
            temp_dir: TempDir::new().unwrap(),
            server_url: server_url.to_string(),
            api_key: Some("test-key".to_string()),
            reconcile: String::new(),
            download_clients: String::new(),
        };
        config.write();
        config
    }

    /// Drop the `api_key` line.
    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self.write();
        self
    }

    /// Set the body of the `[reconcile]` table.
    pub fn with_reconcile(mut self, body: &str) -> Self {
        self.reconcile = body.to_string();
        self.write();
        self
    }

    /// Append raw `[[download_clients]]` tables.
    pub fn with_download_clients(mut self, tables: &str) -> Self {
        self.download_clients = tables.to_string();
        self.write();
        self
    }

    /// Directory holding the config file.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the written `dlsync.toml`.
    pub fn path(&self) -> PathBuf {
        self.dir().join("dlsync.toml")
    }

    fn write(&self) {
        let mut content = format!("[server]\nurl = \"{}\"\n", self.server_url);
        if let Some(key) = &self.api_key {
            content.push_str(&format!("api_key = \"{}\"\n", key));
        }
        if !self.reconcile.is_empty() {
            content.push_str("\n[reconcile]\n");
            content.push_str(&self.reconcile);
            content.push('\n');
        }
        content.push_str(&self.download_clients);
        fs::write(self.path(), content).unwrap();
    }
}
