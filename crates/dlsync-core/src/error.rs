//! Error types for dlsync-core

/// Result type for dlsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dlsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The observed-state provider could not produce the current records
    #[error("Failed to fetch download clients: {source}")]
    Fetch {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Wrap a provider error as a fetch failure
    pub fn fetch(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Fetch {
            source: source.into(),
        }
    }
}
