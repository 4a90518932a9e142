//! Field names the server masks on read

use std::collections::BTreeSet;

/// Fields masked by the server out of the box
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &["apiKey", "password"];

/// Set of field names excluded from equality checks
///
/// The server never returns the real value of these fields, so comparing
/// them would report a change on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveFields {
    names: BTreeSet<String>,
}

impl SensitiveFields {
    /// An empty set: every field is compared
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Add a field name to the set
    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    /// Whether the named field is excluded from comparison
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Iterate the names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for SensitiveFields {
    fn default() -> Self {
        DEFAULT_SENSITIVE_FIELDS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for SensitiveFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for SensitiveFields {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}
