//! Observed-state provider trait

use async_trait::async_trait;

use crate::Result;
use crate::model::ObservedRecord;

/// Source of the server's current download clients
#[async_trait]
pub trait ObservedStateProvider: Send + Sync {
    /// List every download client the server currently holds
    async fn list_download_clients(&self) -> Result<Vec<ObservedRecord>>;
}
