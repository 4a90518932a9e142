//! Error types for dlsync-client

/// Result type for dlsync-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the server
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure (connect, timeout, TLS)
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not the expected JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Server settings are unusable
    #[error("Invalid server configuration: {message}")]
    InvalidConfig { message: String },

    /// A record id that is not a server id
    #[error("Invalid download client id: {id}")]
    InvalidId { id: String },
}

impl Error {
    /// Create an invalid configuration error with the given message
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
