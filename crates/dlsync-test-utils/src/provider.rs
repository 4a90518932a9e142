//! In-memory observed-state providers.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dlsync_core::{Error, ObservedRecord, ObservedStateProvider, Result};

/// Returns a fixed list of records and counts how often it was asked.
#[derive(Debug, Default)]
pub struct StaticProvider {
    records: Vec<ObservedRecord>,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new(records: Vec<ObservedRecord>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `list_download_clients` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObservedStateProvider for StaticProvider {
    async fn list_download_clients(&self) -> Result<Vec<ObservedRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

/// Always fails with the given message.
#[derive(Debug)]
pub struct FailingProvider {
    message: String,
}

impl FailingProvider {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl ObservedStateProvider for FailingProvider {
    async fn list_download_clients(&self) -> Result<Vec<ObservedRecord>> {
        Err(Error::fetch(self.message.clone()))
    }
}
