//! `dlsync.toml` parsing
//!
//! ```toml
//! [server]
//! url = "http://localhost:8989"
//! api_key = "..."
//!
//! [reconcile]
//! extra_sensitive_fields = ["passkey"]
//! delete_unmanaged = false
//!
//! [[download_clients]]
//! name = "qBittorrent"
//! implementation = "QBittorrent"
//! enable = true
//! ```
//!
//! Download client tables use the server's camelCase attribute names
//! (`configContract`, `removeCompletedDownloads`, ...).

use std::path::Path;

use dlsync_client::ServerConfig;
use dlsync_core::{DesiredEntry, SensitiveFields};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Reconciliation settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconcileSection {
    /// Field names masked by the server in addition to the built-in ones
    #[serde(default)]
    pub extra_sensitive_fields: Vec<String>,

    /// Delete server download clients that are not declared below
    #[serde(default)]
    pub delete_unmanaged: bool,
}

/// Parsed `dlsync.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,

    #[serde(default)]
    pub reconcile: ReconcileSection,

    #[serde(default)]
    pub download_clients: Vec<DesiredEntry>,
}

impl Config {
    /// Parse a config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Read and parse the config file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Built-in sensitive fields plus the configured extras
    pub fn sensitive_fields(&self) -> SensitiveFields {
        let mut fields = SensitiveFields::default();
        fields.extend(self.reconcile.extra_sensitive_fields.iter().cloned());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlsync_core::{Field, Protocol, Tag};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
[server]
url = "http://sonarr:8989"
api_key = "abc"
api_version = "v3"

[reconcile]
extra_sensitive_fields = ["passkey"]
delete_unmanaged = true

[[download_clients]]
name = "qBittorrent"
implementation = "QBittorrent"
protocol = "torrent"
enable = true
priority = 1
removeCompletedDownloads = false
tags = ["tv", 3]
fields = [
    { name = "host", value = "qbittorrent" },
    { name = "port", value = 8080 },
]
"#,
        )
        .unwrap();

        assert_eq!(config.server.url, "http://sonarr:8989");
        assert!(config.reconcile.delete_unmanaged);

        let client = &config.download_clients[0];
        assert_eq!(client.protocol, Some(Protocol::Torrent));
        assert_eq!(client.remove_completed_downloads, Some(false));
        assert_eq!(
            client.tags,
            Some(vec![Tag::Label("tv".into()), Tag::Id(3)])
        );
        assert_eq!(
            client.fields,
            Some(vec![
                Field::new("host", "qbittorrent"),
                Field::new("port", json!(8080)),
            ])
        );
    }

    #[test]
    fn test_parse_fixture_config() {
        let config =
            Config::parse(include_str!("../../../test-fixtures/configs/sonarr.toml")).unwrap();

        assert_eq!(config.server.timeout_secs, 15);
        assert_eq!(config.download_clients.len(), 2);
        assert_eq!(config.download_clients[1].protocol, Some(Protocol::Usenet));
        assert!(config.sensitive_fields().contains("passkey"));
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::parse("[server]\nurl = \"http://radarr:7878\"\n").unwrap();

        assert!(config.download_clients.is_empty());
        assert!(!config.reconcile.delete_unmanaged);
        assert_eq!(config.server.api_key, None);
    }

    #[test]
    fn test_sensitive_fields_extend_defaults() {
        let config = Config::parse(
            "[server]\nurl = \"http://x\"\n[reconcile]\nextra_sensitive_fields = [\"passkey\"]\n",
        )
        .unwrap();

        let fields = config.sensitive_fields();
        assert!(fields.contains("apiKey"));
        assert!(fields.contains("passkey"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/dlsync.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_missing_server_section_is_error() {
        assert!(Config::parse("[[download_clients]]\nname = \"qb\"\n").is_err());
    }
}
