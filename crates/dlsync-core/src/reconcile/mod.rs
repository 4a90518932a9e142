//! Reconciliation of desired download clients against server state
//!
//! This module provides:
//! - **index**: identity keys and per-side lookup tables
//! - **equality**: tolerant, secret-aware comparison of a matched pair
//! - **diff**: assembly of the create/update/delete buckets
//!
//! [`Reconciler`] ties them to an [`ObservedStateProvider`].

mod diff;
mod equality;
mod index;

pub use diff::{ChangedEntry, ReconcileDiff, compute_diff, merge};
pub use equality::{Comparison, EqualityEvaluator, Mismatch};
pub use index::{Identified, IdentityIndex, IdentityKey};

use tracing::info;

use crate::Result;
use crate::model::DesiredEntry;
use crate::provider::ObservedStateProvider;
use crate::sensitive::SensitiveFields;

/// Computes what has to change on a server to match desired entries
///
/// The provider is queried once per [`reconcile`](Self::reconcile) call; the
/// rest is pure in-memory work.
#[derive(Debug)]
pub struct Reconciler<P> {
    provider: P,
    sensitive: SensitiveFields,
}

impl<P: ObservedStateProvider> Reconciler<P> {
    /// Create a reconciler that masks the default sensitive fields
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            sensitive: SensitiveFields::default(),
        }
    }

    /// Replace the set of fields excluded from comparison
    pub fn with_sensitive_fields(mut self, sensitive: SensitiveFields) -> Self {
        self.sensitive = sensitive;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn sensitive_fields(&self) -> &SensitiveFields {
        &self.sensitive
    }

    /// Fetch the server state and diff it against `desired`
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged if the fetch fails. No partial
    /// diff is produced in that case.
    pub async fn reconcile(&self, desired: &[DesiredEntry]) -> Result<Option<ReconcileDiff>> {
        let observed = self.provider.list_download_clients().await?;

        info!(
            desired = desired.len(),
            observed = observed.len(),
            "Reconciling download clients"
        );

        Ok(compute_diff(desired, &observed, &self.sensitive))
    }
}
