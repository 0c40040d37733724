//! # easy-compose
//!
//! Reads and checks the compose descriptor of a bundle, and manages the
//! bundle's `.env` file.
//!
//! Handles:
//! - **Descriptor**: A tolerant serde model of `docker-compose.yml`.
//! - **Validator**: Static checks reported as issues and warnings.
//! - **Summary**: Condensed per-service view for `show`.
//! - **Env**: Sample discovery, parsing, reset with backup, edits.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod descriptor;
pub mod env;
pub mod summary;
pub mod validator;

pub use descriptor::{ComposeFile, Environment, ServiceSpec};
pub use env::EnvEntry;
pub use summary::{BundleSummary, ServiceSummary, summarize};
pub use validator::{ValidationReport, validate, validate_bundle};
