//! # easy-store
//!
//! Local bundle storage for easy-containers.
//!
//! Handles:
//! - **Store**: Name-to-path resolution and installed-bundle detection.
//! - **Copy**: Recursive directory copies for mirrors and backups.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod copy;
pub mod store;

pub use store::BundleStore;
