//! # easy-runtime
//!
//! Black-box invocation of the external container tooling.
//!
//! Handles:
//! - **Tool**: The single spawn path, in captured or inherited I/O mode,
//!   with exit statuses mapped to structured errors.
//! - **Compose**: Lifecycle verbs run with the bundle as working directory.
//! - **Docker**: Container listing, lookup and exec.
//! - **Signal**: Forwarding of Ctrl+C to the foreground child.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod compose;
pub mod docker;
pub mod signal;
pub mod tool;

pub use compose::{ComposeRunner, LogOptions};
pub use docker::{ContainerSummary, DockerClient, verify_environment};
pub use tool::{IoMode, ProcessOutput, Tool};
