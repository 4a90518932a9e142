//! Download client reconciliation for dlsync
//!
//! This crate decides what has to change on a Sonarr/Radarr-style server so
//! that its download clients match a user-declared list:
//!
//! - **Model**: [`DesiredEntry`] (declared) and [`ObservedRecord`] (reported)
//! - **Reconciliation**: identity matching, tolerant comparison and diff assembly
//! - **Provider seam**: [`ObservedStateProvider`] supplies the server state
//!
//! It never talks to the server itself; applying a diff is the caller's job.
//!
//! # Example
//!
//! ```
//! use dlsync_core::{DesiredEntry, ObservedRecord, SensitiveFields, compute_diff};
//!
//! let desired = vec![DesiredEntry {
//!     enable: Some(true),
//!     ..DesiredEntry::new("qb", "QBittorrent")
//! }];
//! let observed = vec![ObservedRecord {
//!     id: 7,
//!     name: "qb".into(),
//!     implementation: "QBittorrent".into(),
//!     enable: Some(false),
//!     ..ObservedRecord::default()
//! }];
//!
//! let diff = compute_diff(&desired, &observed, &SensitiveFields::default()).unwrap();
//! assert_eq!(diff.changed[0].id, "7");
//! assert_eq!(diff.changed[0].payload.enable, Some(true));
//! ```

pub mod error;
pub mod model;
pub mod provider;
pub mod reconcile;
pub mod sensitive;

pub use error::{Error, Result};
pub use model::{DesiredEntry, Field, ObservedRecord, Protocol, Tag};
pub use provider::ObservedStateProvider;
pub use reconcile::{
    ChangedEntry, Comparison, EqualityEvaluator, Identified, IdentityIndex, IdentityKey, Mismatch,
    ReconcileDiff, Reconciler, compute_diff, merge,
};
pub use sensitive::{DEFAULT_SENSITIVE_FIELDS, SensitiveFields};
