//! # easy-catalog
//!
//! Read-only access to the remote service catalog.
//!
//! Handles:
//! - **Entries**: The `{name, type}` listing shape and its filtering rules.
//! - **Source**: The [`CatalogSource`] seam used by the acquisition pipeline.
//! - **Client**: The HTTP implementation against a contents API and a
//!   raw-content host.
//! - **Search**: Substring search and short descriptions of well-known services.
//!
//! Every call is a single attempt; retries belong to the caller.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod client;
pub mod entry;
pub mod search;
pub mod source;

pub use client::CatalogClient;
pub use entry::{CatalogEntry, EntryKind};
pub use source::CatalogSource;
