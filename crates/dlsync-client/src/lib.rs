//! HTTP client for the download client API of Sonarr/Radarr-style servers
//!
//! [`DownloadClientApi`] lists, creates, updates and deletes download clients
//! over `/api/{version}/downloadclient`. It implements
//! [`ObservedStateProvider`](dlsync_core::ObservedStateProvider) so it can
//! feed a [`Reconciler`](dlsync_core::Reconciler) directly, and
//! [`apply_diff`] turns the reconciler's output into API calls.

pub mod api;
pub mod apply;
pub mod config;
pub mod error;

pub use api::{DownloadClientApi, DownloadClientWriter};
pub use apply::{ApplyOptions, ApplyReport, apply_diff};
pub use config::ServerConfig;
pub use error::{Error, Result};
