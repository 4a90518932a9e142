//! Shared test utilities for the dlsync workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`fixtures`]: desired entries and server records for a qBittorrent/SABnzbd setup
//! - [`provider`]: in-memory [`ObservedStateProvider`](dlsync_core::ObservedStateProvider) doubles
//! - [`config`]: [`TestConfig`](config::TestConfig) writer for `dlsync.toml` files

pub mod config;
pub mod fixtures;
pub mod provider;
