//! Equality evaluation for matched download clients
//!
//! Comparison is tolerant: an attribute the desired entry leaves unset is not
//! asserted, whatever the server holds. Attributes that are set must match
//! exactly. Checks run in a fixed order and stop at the first mismatch:
//!
//! 1. the ten scalar attributes
//! 2. tags, as an unordered multiset of their string forms
//! 3. fields, keyed by name, with sensitive fields removed from both sides

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::index::Identified;
use crate::model::{DesiredEntry, Field, ObservedRecord, Tag};
use crate::sensitive::SensitiveFields;

const ABSENT: &str = "<absent>";

/// The first attribute found to differ between server and desired state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Attribute path, e.g. `enable` or `fields.host`
    pub attribute: String,
    /// Rendered server value
    pub observed: String,
    /// Rendered desired value
    pub desired: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: server has {}, wanted {}",
            self.attribute, self.observed, self.desired
        )
    }
}

/// Outcome of comparing one matched pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Match,
    Mismatch(Mismatch),
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Decides whether a server record already satisfies a desired entry
#[derive(Debug, Clone, Copy)]
pub struct EqualityEvaluator<'a> {
    sensitive: &'a SensitiveFields,
}

impl<'a> EqualityEvaluator<'a> {
    pub fn new(sensitive: &'a SensitiveFields) -> Self {
        Self { sensitive }
    }

    /// Compare a matched pair and log the outcome
    pub fn compare(&self, observed: &ObservedRecord, desired: &DesiredEntry) -> Comparison {
        let key = desired.identity_key();

        match self.first_mismatch(observed, desired) {
            Some(mismatch) => {
                debug!(
                    key = %key,
                    attribute = %mismatch.attribute,
                    observed = %mismatch.observed,
                    desired = %mismatch.desired,
                    "Download client differs from server"
                );
                Comparison::Mismatch(mismatch)
            }
            None => {
                debug!(key = %key, "Download client up to date");
                Comparison::Match
            }
        }
    }

    fn first_mismatch(&self, observed: &ObservedRecord, desired: &DesiredEntry) -> Option<Mismatch> {
        scalar_mismatch(observed, desired)
            .or_else(|| {
                desired
                    .tags
                    .as_deref()
                    .and_then(|tags| tags_mismatch(&observed.tags, tags))
            })
            .or_else(|| {
                desired
                    .fields
                    .as_deref()
                    .and_then(|fields| self.fields_mismatch(&observed.fields, fields))
            })
    }

    fn fields_mismatch(&self, observed: &[Field], desired: &[Field]) -> Option<Mismatch> {
        let observed = self.field_map(observed);
        let desired = self.field_map(desired);

        for name in desired.keys() {
            if !observed.contains_key(name) {
                return Some(Mismatch {
                    attribute: format!("fields.{}", name),
                    observed: ABSENT.to_string(),
                    desired: render(desired.get(name)),
                });
            }
        }

        for (name, value) in &observed {
            match desired.get(name) {
                None => {
                    return Some(Mismatch {
                        attribute: format!("fields.{}", name),
                        observed: render(Some(value)),
                        desired: ABSENT.to_string(),
                    });
                }
                Some(wanted) if wanted != value => {
                    return Some(Mismatch {
                        attribute: format!("fields.{}", name),
                        observed: render(Some(value)),
                        desired: render(Some(wanted)),
                    });
                }
                Some(_) => {}
            }
        }

        None
    }

    fn field_map<'f>(&self, fields: &'f [Field]) -> BTreeMap<&'f str, &'f Value> {
        fields
            .iter()
            .filter(|field| !self.sensitive.contains(&field.name))
            .map(|field| (field.name.as_str(), &field.value))
            .collect()
    }
}

fn scalar_mismatch(observed: &ObservedRecord, desired: &DesiredEntry) -> Option<Mismatch> {
    check(
        "configContract",
        observed.config_contract.as_ref(),
        desired.config_contract.as_ref(),
    )
    .or_else(|| check("enable", observed.enable.as_ref(), desired.enable.as_ref()))
    .or_else(|| {
        check(
            "implementation",
            Some(&observed.implementation),
            Some(&desired.implementation),
        )
    })
    .or_else(|| {
        check(
            "implementationName",
            observed.implementation_name.as_ref(),
            desired.implementation_name.as_ref(),
        )
    })
    .or_else(|| {
        check(
            "infoLink",
            observed.info_link.as_ref(),
            desired.info_link.as_ref(),
        )
    })
    .or_else(|| check("name", Some(&observed.name), Some(&desired.name)))
    .or_else(|| {
        check(
            "priority",
            observed.priority.as_ref(),
            desired.priority.as_ref(),
        )
    })
    .or_else(|| {
        check(
            "protocol",
            observed.protocol.as_ref(),
            desired.protocol.as_ref(),
        )
    })
    .or_else(|| {
        check(
            "removeCompletedDownloads",
            observed.remove_completed_downloads.as_ref(),
            desired.remove_completed_downloads.as_ref(),
        )
    })
    .or_else(|| {
        check(
            "removeFailedDownloads",
            observed.remove_failed_downloads.as_ref(),
            desired.remove_failed_downloads.as_ref(),
        )
    })
}

/// Unset desired values are not asserted
fn check<T: PartialEq + Serialize>(
    attribute: &str,
    observed: Option<&T>,
    desired: Option<&T>,
) -> Option<Mismatch> {
    let desired = desired?;
    if observed == Some(desired) {
        return None;
    }

    Some(Mismatch {
        attribute: attribute.to_string(),
        observed: observed.map_or_else(|| ABSENT.to_string(), to_json),
        desired: to_json(desired),
    })
}

fn tags_mismatch(observed: &[Tag], desired: &[Tag]) -> Option<Mismatch> {
    let observed = sorted_tags(observed);
    let desired = sorted_tags(desired);

    if observed == desired {
        return None;
    }

    Some(Mismatch {
        attribute: "tags".to_string(),
        observed: to_json(&observed),
        desired: to_json(&desired),
    })
}

fn sorted_tags(tags: &[Tag]) -> Vec<String> {
    let mut tags: Vec<String> = tags.iter().map(Tag::to_string).collect();
    tags.sort();
    tags
}

/// Render a value the way the server's JSON carries it
fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_value(value)
        .unwrap_or(Value::Null)
        .to_string()
}

fn render(value: Option<&&Value>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Protocol;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn observed() -> ObservedRecord {
        ObservedRecord {
            id: 7,
            name: "qb".into(),
            implementation: "QBittorrent".into(),
            implementation_name: Some("qBittorrent".into()),
            config_contract: Some("QBittorrentSettings".into()),
            protocol: Some(Protocol::Torrent),
            enable: Some(true),
            priority: Some(1),
            remove_completed_downloads: Some(true),
            remove_failed_downloads: Some(true),
            info_link: Some("https://wiki.servarr.com".into()),
            tags: vec![Tag::Id(1), Tag::Id(2)],
            fields: vec![
                Field::new("host", "localhost"),
                Field::new("port", 8080),
                Field::new("password", "********"),
            ],
            ..ObservedRecord::default()
        }
    }

    fn compare(observed: &ObservedRecord, desired: &DesiredEntry) -> Comparison {
        let sensitive = SensitiveFields::default();
        EqualityEvaluator::new(&sensitive).compare(observed, desired)
    }

    fn mismatch_attribute(comparison: Comparison) -> String {
        match comparison {
            Comparison::Mismatch(m) => m.attribute,
            Comparison::Match => panic!("expected a mismatch"),
        }
    }

    #[test]
    fn test_identity_only_entry_matches() {
        let desired = DesiredEntry::new("qb", "QBittorrent");
        assert_eq!(compare(&observed(), &desired), Comparison::Match);
    }

    #[rstest]
    #[case::enable(DesiredEntry { enable: Some(false), ..DesiredEntry::new("qb", "QBittorrent") }, "enable")]
    #[case::priority(DesiredEntry { priority: Some(5), ..DesiredEntry::new("qb", "QBittorrent") }, "priority")]
    #[case::protocol(DesiredEntry { protocol: Some(Protocol::Usenet), ..DesiredEntry::new("qb", "QBittorrent") }, "protocol")]
    #[case::contract(DesiredEntry { config_contract: Some("Other".into()), ..DesiredEntry::new("qb", "QBittorrent") }, "configContract")]
    #[case::info_link(DesiredEntry { info_link: Some("x".into()), ..DesiredEntry::new("qb", "QBittorrent") }, "infoLink")]
    #[case::remove_failed(DesiredEntry { remove_failed_downloads: Some(false), ..DesiredEntry::new("qb", "QBittorrent") }, "removeFailedDownloads")]
    fn test_scalar_mismatch_reports_attribute(#[case] desired: DesiredEntry, #[case] attribute: &str) {
        assert_eq!(mismatch_attribute(compare(&observed(), &desired)), attribute);
    }

    #[test]
    fn test_absent_on_server_is_mismatch() {
        let mut server = observed();
        server.priority = None;
        let desired = DesiredEntry {
            priority: Some(1),
            ..DesiredEntry::new("qb", "QBittorrent")
        };

        match compare(&server, &desired) {
            Comparison::Mismatch(m) => {
                assert_eq!(m.attribute, "priority");
                assert_eq!(m.observed, "<absent>");
                assert_eq!(m.desired, "1");
            }
            Comparison::Match => panic!("expected a mismatch"),
        }
    }

    #[test]
    fn test_scalar_mismatch_renders_as_json() {
        let desired = DesiredEntry {
            protocol: Some(Protocol::Usenet),
            ..DesiredEntry::new("qb", "QBittorrent")
        };

        match compare(&observed(), &desired) {
            Comparison::Mismatch(m) => {
                assert_eq!(m.observed, "\"torrent\"");
                assert_eq!(m.desired, "\"usenet\"");
                assert_eq!(
                    m.to_string(),
                    "protocol: server has \"torrent\", wanted \"usenet\""
                );
            }
            Comparison::Match => panic!("expected a mismatch"),
        }
    }

    #[test]
    fn test_tag_mismatch_renders_as_json() {
        let desired = DesiredEntry {
            tags: Some(vec![Tag::Label("tv".into())]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };

        match compare(&observed(), &desired) {
            Comparison::Mismatch(m) => {
                assert_eq!(m.observed, r#"["1","2"]"#);
                assert_eq!(m.desired, r#"["tv"]"#);
            }
            Comparison::Match => panic!("expected a mismatch"),
        }
    }

    #[test]
    fn test_first_failing_check_is_reported() {
        let desired = DesiredEntry {
            enable: Some(false),
            priority: Some(9),
            tags: Some(vec![Tag::Id(3)]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };
        assert_eq!(mismatch_attribute(compare(&observed(), &desired)), "enable");
    }

    #[test]
    fn test_tags_compare_as_unordered_strings() {
        let desired = DesiredEntry {
            tags: Some(vec![Tag::Label("2".into()), Tag::Id(1)]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };
        assert!(compare(&observed(), &desired).is_match());
    }

    #[test]
    fn test_tags_compare_cardinality() {
        let desired = DesiredEntry {
            tags: Some(vec![Tag::Id(1), Tag::Id(2), Tag::Id(2)]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };
        assert_eq!(mismatch_attribute(compare(&observed(), &desired)), "tags");
    }

    #[test]
    fn test_empty_desired_tags_are_asserted() {
        let desired = DesiredEntry {
            tags: Some(Vec::new()),
            ..DesiredEntry::new("qb", "QBittorrent")
        };
        assert_eq!(mismatch_attribute(compare(&observed(), &desired)), "tags");
    }

    #[test]
    fn test_fields_ignore_sensitive_and_order() {
        let desired = DesiredEntry {
            fields: Some(vec![
                Field::new("port", 8080),
                Field::new("password", "hunter2"),
                Field::new("host", "localhost"),
            ]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };
        assert!(compare(&observed(), &desired).is_match());
    }

    #[test]
    fn test_field_missing_on_server() {
        let desired = DesiredEntry {
            fields: Some(vec![
                Field::new("host", "localhost"),
                Field::new("port", 8080),
                Field::new("category", "tv"),
            ]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };
        assert_eq!(
            mismatch_attribute(compare(&observed(), &desired)),
            "fields.category"
        );
    }

    #[test]
    fn test_field_only_on_server() {
        let desired = DesiredEntry {
            fields: Some(vec![Field::new("host", "localhost")]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };
        assert_eq!(
            mismatch_attribute(compare(&observed(), &desired)),
            "fields.port"
        );
    }

    #[test]
    fn test_field_value_differs() {
        let desired = DesiredEntry {
            fields: Some(vec![
                Field::new("host", "qbittorrent"),
                Field::new("port", 8080),
            ]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };

        match compare(&observed(), &desired) {
            Comparison::Mismatch(m) => {
                assert_eq!(m.attribute, "fields.host");
                assert_eq!(m.observed, "\"localhost\"");
                assert_eq!(m.desired, "\"qbittorrent\"");
            }
            Comparison::Match => panic!("expected a mismatch"),
        }
    }

    #[test]
    fn test_nested_values_ignore_object_key_order() {
        let mut server = observed();
        server.fields = vec![Field::new("opts", json!({"a": 1, "b": [1, 2]}))];
        let desired = DesiredEntry {
            fields: Some(vec![Field::new("opts", json!({"b": [1, 2], "a": 1}))]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };
        assert!(compare(&server, &desired).is_match());
    }

    #[test]
    fn test_nested_array_order_counts() {
        let mut server = observed();
        server.fields = vec![Field::new("opts", json!([1, 2]))];
        let desired = DesiredEntry {
            fields: Some(vec![Field::new("opts", json!([2, 1]))]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };
        assert!(!compare(&server, &desired).is_match());
    }

    #[test]
    fn test_empty_sensitive_set_compares_secrets() {
        let sensitive = SensitiveFields::empty();
        let desired = DesiredEntry {
            fields: Some(vec![
                Field::new("host", "localhost"),
                Field::new("port", 8080),
                Field::new("password", "hunter2"),
            ]),
            ..DesiredEntry::new("qb", "QBittorrent")
        };

        let result = EqualityEvaluator::new(&sensitive).compare(&observed(), &desired);
        assert_eq!(mismatch_attribute(result), "fields.password");
    }
}
