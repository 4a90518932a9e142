//! Download client records
//!
//! Two shapes describe the same thing: a [`DesiredEntry`] is what the user
//! declared, an [`ObservedRecord`] is what the server reports. Both serialize
//! with the server's camelCase JSON keys so the same types work for the
//! config file, the HTTP API and the diff output.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Transfer protocol a download client speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// BitTorrent clients (qBittorrent, Transmission, ...)
    Torrent,
    /// Usenet clients (SABnzbd, NZBGet, ...)
    Usenet,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Torrent => write!(f, "torrent"),
            Self::Usenet => write!(f, "usenet"),
        }
    }
}

/// A tag reference, either a label or a numeric server tag id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tag {
    Id(i64),
    Label(String),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Label(label) => write!(f, "{}", label),
        }
    }
}

impl From<i64> for Tag {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for Tag {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

/// A named implementation setting (host, port, category, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(default)]
    pub value: Value,

    /// Server-side metadata such as `label`, `type` or `privacy`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Field {
    /// Create a field with no server metadata
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            extra: Map::new(),
        }
    }
}

/// A user-declared download client
///
/// Only `name` and `implementation` are required. Every other attribute is
/// optional, and an absent attribute is never asserted against the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredEntry {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub implementation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_contract: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_completed_downloads: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_failed_downloads: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
}

impl DesiredEntry {
    /// Create an entry that only asserts its identity
    pub fn new(name: impl Into<String>, implementation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            implementation: implementation.into(),
            ..Self::default()
        }
    }
}

/// A download client as reported by the server
///
/// Attributes the server sends that are not modelled here are kept in
/// `extra` and written back unchanged when the record is updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservedRecord {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub implementation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_contract: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_completed_downloads: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_failed_downloads: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
