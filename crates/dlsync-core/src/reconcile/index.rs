//! Identity indexing
//!
//! Desired entries and observed records are matched on the pair
//! `(name, implementation)`, rendered as `name::implementation`.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::model::{DesiredEntry, ObservedRecord};

/// Composite identity of a download client
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(name: &str, implementation: &str) -> Self {
        Self(format!("{}::{}", name, implementation))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Records that carry a download client identity
pub trait Identified {
    fn name(&self) -> &str;
    fn implementation(&self) -> &str;

    fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(self.name(), self.implementation())
    }
}

impl Identified for DesiredEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn implementation(&self) -> &str {
        &self.implementation
    }
}

impl Identified for ObservedRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn implementation(&self) -> &str {
        &self.implementation
    }
}

/// Lookup from identity key to record
///
/// Later records overwrite earlier ones with the same key. Iteration follows
/// the order in which each key was first seen.
#[derive(Debug)]
pub struct IdentityIndex<'a, T> {
    order: Vec<IdentityKey>,
    entries: HashMap<IdentityKey, &'a T>,
}

impl<'a, T: Identified> IdentityIndex<'a, T> {
    pub fn build(records: &'a [T]) -> Self {
        let mut order = Vec::with_capacity(records.len());
        let mut entries = HashMap::with_capacity(records.len());

        for record in records {
            let key = record.identity_key();
            if entries.insert(key.clone(), record).is_some() {
                debug!(key = %key, "Duplicate download client identity, keeping last entry");
            } else {
                order.push(key);
            }
        }

        Self { order, entries }
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&'a T> {
        self.entries.get(key).copied()
    }

    pub fn contains_key(&self, key: &IdentityKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate `(key, record)` pairs in first-seen key order
    pub fn iter(&self) -> impl Iterator<Item = (&IdentityKey, &'a T)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|record| (key, *record)))
    }
}
