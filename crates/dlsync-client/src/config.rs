//! Server connection settings

use std::fmt;

use serde::{Deserialize, Serialize};

fn default_api_version() -> String {
    "v3".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Where the server lives and how to authenticate against it
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL, e.g. `http://localhost:8989`
    pub url: String,

    /// Value sent in the `X-Api-Key` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API path segment: `v3` for Sonarr/Radarr, `v1` for Lidarr/Readarr
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServerConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: Some(api_key.into()),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// URL of the download client collection
    pub fn download_client_url(&self) -> String {
        format!(
            "{}/api/{}/downloadclient",
            self.url.trim_end_matches('/'),
            self.api_version
        )
    }
}

// Keep the api key out of logs.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
