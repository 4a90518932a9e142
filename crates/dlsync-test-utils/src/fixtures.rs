//! Download client fixtures.
//!
//! [`qbittorrent_observed`] and [`qbittorrent_desired`] describe the same
//! client, so reconciling one against the other yields no changes.

use dlsync_core::{DesiredEntry, Field, ObservedRecord, Protocol, Tag};
use serde_json::json;

/// A fully specified qBittorrent entry.
pub fn qbittorrent_desired() -> DesiredEntry {
    DesiredEntry {
        implementation_name: Some("qBittorrent".into()),
        config_contract: Some("QBittorrentSettings".into()),
        protocol: Some(Protocol::Torrent),
        enable: Some(true),
        priority: Some(1),
        remove_completed_downloads: Some(true),
        remove_failed_downloads: Some(true),
        info_link: Some("https://wiki.servarr.com/sonarr/supported#qbittorrent".into()),
        tags: Some(vec![Tag::Id(1), Tag::Id(2)]),
        fields: Some(vec![
            Field::new("host", "qbittorrent"),
            Field::new("port", 8080),
            Field::new("useSsl", false),
            Field::new("username", "admin"),
            Field::new("password", "hunter2"),
            Field::new("tvCategory", "tv-sonarr"),
        ]),
        ..DesiredEntry::new("qBittorrent", "QBittorrent")
    }
}

/// The server's view of [`qbittorrent_desired`], with the password masked,
/// tags in a different order and server-only metadata attached.
pub fn qbittorrent_observed(id: i64) -> ObservedRecord {
    let mut record = ObservedRecord {
        id,
        name: "qBittorrent".into(),
        implementation: "QBittorrent".into(),
        implementation_name: Some("qBittorrent".into()),
        config_contract: Some("QBittorrentSettings".into()),
        protocol: Some(Protocol::Torrent),
        enable: Some(true),
        priority: Some(1),
        remove_completed_downloads: Some(true),
        remove_failed_downloads: Some(true),
        info_link: Some("https://wiki.servarr.com/sonarr/supported#qbittorrent".into()),
        tags: vec![Tag::Id(2), Tag::Id(1)],
        fields: vec![
            server_field("host", json!("qbittorrent"), "Host"),
            server_field("port", json!(8080), "Port"),
            server_field("useSsl", json!(false), "Use SSL"),
            server_field("username", json!("admin"), "Username"),
            server_field("password", json!("********"), "Password"),
            server_field("tvCategory", json!("tv-sonarr"), "Category"),
        ],
        ..ObservedRecord::default()
    };
    record.extra.insert("supportsOnGrab".into(), json!(false));
    record.extra.insert("supportsOnDownload".into(), json!(true));
    record
}

/// A minimal SABnzbd entry.
pub fn sabnzbd_desired() -> DesiredEntry {
    DesiredEntry {
        protocol: Some(Protocol::Usenet),
        enable: Some(true),
        fields: Some(vec![
            Field::new("host", "sabnzbd"),
            Field::new("port", 8080),
            Field::new("apiKey", "0123456789abcdef"),
        ]),
        ..DesiredEntry::new("SABnzbd", "Sabnzbd")
    }
}

/// The server's view of [`sabnzbd_desired`], with the api key masked.
pub fn sabnzbd_observed(id: i64) -> ObservedRecord {
    ObservedRecord {
        id,
        name: "SABnzbd".into(),
        implementation: "Sabnzbd".into(),
        protocol: Some(Protocol::Usenet),
        enable: Some(true),
        fields: vec![
            server_field("host", json!("sabnzbd"), "Host"),
            server_field("port", json!(8080), "Port"),
            server_field("apiKey", json!("********"), "API Key"),
        ],
        ..ObservedRecord::default()
    }
}

/// A bare server record with only id and identity set.
pub fn observed(id: i64, name: &str, implementation: &str) -> ObservedRecord {
    ObservedRecord {
        id,
        name: name.into(),
        implementation: implementation.into(),
        ..ObservedRecord::default()
    }
}

fn server_field(name: &str, value: serde_json::Value, label: &str) -> Field {
    let mut field = Field::new(name, value);
    field.extra.insert("label".into(), json!(label));
    field
}
