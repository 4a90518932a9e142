//! Diff assembly
//!
//! Splits the two identity indices into the three buckets a caller needs to
//! converge the server: entries to create, records to delete and records to
//! update.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::equality::{Comparison, EqualityEvaluator};
use super::index::IdentityIndex;
use crate::model::{DesiredEntry, ObservedRecord};
use crate::sensitive::SensitiveFields;

/// An update for one existing download client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangedEntry {
    /// Server id of the record to update
    pub id: String,
    /// Full record to send: server state overlaid with desired attributes
    pub payload: ObservedRecord,
}

/// Work needed to bring the server in line with the desired entries
///
/// Never constructed empty by [`compute_diff`]; "nothing to do" is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileDiff {
    /// Desired entries with no server counterpart
    pub missing_on_server: Vec<DesiredEntry>,
    /// Server records with no desired counterpart
    pub not_available_anymore: Vec<ObservedRecord>,
    /// Matched pairs whose server state does not satisfy the desired entry
    pub changed: Vec<ChangedEntry>,
}

impl ReconcileDiff {
    pub fn is_empty(&self) -> bool {
        self.missing_on_server.is_empty()
            && self.not_available_anymore.is_empty()
            && self.changed.is_empty()
    }

    /// Total number of create, update and delete actions
    pub fn len(&self) -> usize {
        self.missing_on_server.len() + self.not_available_anymore.len() + self.changed.len()
    }
}

/// Compute the diff between desired entries and server records
///
/// Returns `None` when the server already satisfies every desired entry and
/// holds nothing else.
pub fn compute_diff(
    desired: &[DesiredEntry],
    observed: &[ObservedRecord],
    sensitive: &SensitiveFields,
) -> Option<ReconcileDiff> {
    let desired_index = IdentityIndex::build(desired);
    let observed_index = IdentityIndex::build(observed);
    let evaluator = EqualityEvaluator::new(sensitive);

    let mut diff = ReconcileDiff::default();

    for (key, entry) in desired_index.iter() {
        match observed_index.get(key) {
            None => diff.missing_on_server.push(entry.clone()),
            Some(record) => {
                if let Comparison::Mismatch(_) = evaluator.compare(record, entry) {
                    diff.changed.push(ChangedEntry {
                        id: record.id.to_string(),
                        payload: merge(record, entry, sensitive),
                    });
                }
            }
        }
    }

    for (key, record) in observed_index.iter() {
        if !desired_index.contains_key(key) {
            diff.not_available_anymore.push(record.clone());
        }
    }

    info!(
        missing = diff.missing_on_server.len(),
        changed = diff.changed.len(),
        unmanaged = diff.not_available_anymore.len(),
        "Computed download client diff"
    );

    if diff.is_empty() { None } else { Some(diff) }
}

/// Overlay the attributes a desired entry sets onto a server record
///
/// The id and every server-only attribute carry over untouched. When the
/// desired entry replaces the field list, sensitive fields it leaves out are
/// kept with the server's masked value, which the server reads as unchanged.
pub fn merge(
    observed: &ObservedRecord,
    desired: &DesiredEntry,
    sensitive: &SensitiveFields,
) -> ObservedRecord {
    let mut payload = observed.clone();

    payload.name = desired.name.clone();
    payload.implementation = desired.implementation.clone();
    if let Some(implementation_name) = &desired.implementation_name {
        payload.implementation_name = Some(implementation_name.clone());
    }
    if let Some(config_contract) = &desired.config_contract {
        payload.config_contract = Some(config_contract.clone());
    }
    if let Some(protocol) = desired.protocol {
        payload.protocol = Some(protocol);
    }
    if let Some(enable) = desired.enable {
        payload.enable = Some(enable);
    }
    if let Some(priority) = desired.priority {
        payload.priority = Some(priority);
    }
    if let Some(remove) = desired.remove_completed_downloads {
        payload.remove_completed_downloads = Some(remove);
    }
    if let Some(remove) = desired.remove_failed_downloads {
        payload.remove_failed_downloads = Some(remove);
    }
    if let Some(info_link) = &desired.info_link {
        payload.info_link = Some(info_link.clone());
    }
    if let Some(tags) = &desired.tags {
        payload.tags = tags.clone();
    }
    if let Some(fields) = &desired.fields {
        let kept = observed.fields.iter().filter(|field| {
            sensitive.contains(&field.name) && !fields.iter().any(|f| f.name == field.name)
        });
        payload.fields = fields.iter().chain(kept).cloned().collect();
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, Protocol, Tag};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn observed(id: i64, name: &str) -> ObservedRecord {
        ObservedRecord {
            id,
            name: name.into(),
            implementation: "QBittorrent".into(),
            enable: Some(false),
            ..ObservedRecord::default()
        }
    }

    #[test]
    fn test_merge_overrides_set_attributes_only() {
        let mut record = observed(7, "qb");
        record.priority = Some(2);
        record.protocol = Some(Protocol::Torrent);
        record.tags = vec![Tag::Id(1)];
        record.extra.insert("supportsOnGrab".into(), json!(true));

        let desired = DesiredEntry {
            enable: Some(true),
            fields: Some(vec![Field::new("host", "qbittorrent")]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };

        let payload = merge(&record, &desired, &SensitiveFields::default());
        assert_eq!(payload.id, 7);
        assert_eq!(payload.enable, Some(true));
        assert_eq!(payload.priority, Some(2));
        assert_eq!(payload.protocol, Some(Protocol::Torrent));
        assert_eq!(payload.tags, vec![Tag::Id(1)]);
        assert_eq!(payload.fields, vec![Field::new("host", "qbittorrent")]);
        assert_eq!(payload.extra.get("supportsOnGrab"), Some(&json!(true)));
    }

    #[test]
    fn test_merge_keeps_undeclared_sensitive_fields() {
        let mut record = observed(7, "qb");
        record.fields = vec![
            Field::new("host", "localhost"),
            Field::new("password", "********"),
            Field::new("apiKey", "********"),
        ];

        let desired = DesiredEntry {
            enable: Some(true),
            fields: Some(vec![
                Field::new("host", "qbittorrent"),
                Field::new("apiKey", "new-key"),
            ]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };

        let payload = merge(&record, &desired, &SensitiveFields::default());
        assert_eq!(
            payload.fields,
            vec![
                Field::new("host", "qbittorrent"),
                Field::new("apiKey", "new-key"),
                Field::new("password", "********"),
            ]
        );
    }

    #[test]
    fn test_changed_payload_keeps_masked_password() {
        let mut record = observed(7, "qb");
        record.fields = vec![
            Field::new("host", "localhost"),
            Field::new("password", "********"),
        ];
        let desired = vec![DesiredEntry {
            enable: Some(true),
            fields: Some(vec![Field::new("host", "localhost")]),
            ..DesiredEntry::new("qb", "QBittorrent")
        }];

        let diff = compute_diff(&desired, &[record], &SensitiveFields::default()).unwrap();

        let names: Vec<_> = diff.changed[0]
            .payload
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["host", "password"]);
    }

    #[test]
    fn test_matching_pair_lands_in_no_bucket() {
        let desired = vec![DesiredEntry {
            enable: Some(false),
            ..DesiredEntry::new("qb", "QBittorrent")
        }];
        let server = vec![observed(1, "qb")];

        assert_eq!(compute_diff(&desired, &server, &SensitiveFields::default()), None);
    }

    #[test]
    fn test_buckets_follow_input_order() {
        let desired = vec![
            DesiredEntry::new("c", "QBittorrent"),
            DesiredEntry {
                enable: Some(true),
                ..DesiredEntry::new("b", "QBittorrent")
            },
            DesiredEntry::new("a", "QBittorrent"),
        ];
        let server = vec![observed(3, "z"), observed(2, "b"), observed(1, "y")];

        let diff = compute_diff(&desired, &server, &SensitiveFields::default()).unwrap();

        let missing: Vec<_> = diff.missing_on_server.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(missing, vec!["c", "a"]);

        let gone: Vec<_> = diff.not_available_anymore.iter().map(|r| r.id).collect();
        assert_eq!(gone, vec![3, 1]);

        assert_eq!(diff.changed.len(), 1);
        assert_eq!(diff.changed[0].id, "2");
        assert_eq!(diff.len(), 5);
    }

    #[test]
    fn test_duplicate_desired_entries_last_wins() {
        let desired = vec![
            DesiredEntry {
                enable: Some(true),
                ..DesiredEntry::new("qb", "QBittorrent")
            },
            DesiredEntry {
                enable: Some(false),
                ..DesiredEntry::new("qb", "QBittorrent")
            },
        ];
        let server = vec![observed(1, "qb")];

        assert_eq!(compute_diff(&desired, &server, &SensitiveFields::default()), None);
    }

    #[test]
    fn test_diff_serializes_with_camel_case_buckets() {
        let desired = vec![DesiredEntry::new("qb", "QBittorrent")];
        let diff = compute_diff(&desired, &[], &SensitiveFields::default()).unwrap();

        let value = serde_json::to_value(&diff).unwrap();
        assert_eq!(
            value,
            json!({
                "missingOnServer": [{"name": "qb", "implementation": "QBittorrent"}],
                "notAvailableAnymore": [],
                "changed": []
            })
        );
    }
}
