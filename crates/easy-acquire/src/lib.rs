//! # easy-acquire
//!
//! Guarantees that a complete service bundle exists on disk before any
//! lifecycle command touches it.
//!
//! Handles:
//! - **Pipeline**: Idempotent `ensure_bundle`, `update_bundle` with
//!   timestamped backups, and `init_bundle` for starter templates.
//! - **Strategies**: Sparse tree fetch, per-file raw fetch, local mirror
//!   copy and template synthesis, tried in that order.
//! - **Staging**: Hidden per-attempt directories inside the bundle root,
//!   renamed into place only once complete.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod git;
pub mod pipeline;
pub mod staging;
pub mod strategy;

pub use pipeline::{Acquired, Pipeline, Updated};
pub use strategy::AcquisitionStrategy;
