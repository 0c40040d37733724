//! Unified error types for the easy-containers workspace.
//!
//! The catalog, acquisition and runtime layers all report through
//! [`EasyError`]. Acquisition strategies return specific variants which the
//! pipeline collects into [`EasyError::AcquisitionFailed`] once every
//! strategy has been tried.

use std::fmt::Write as _;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::FetchStrategy;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum EasyError {
    /// A service name is empty or would escape the bundle root.
    #[error("invalid service name {name:?}: {reason}")]
    InvalidServiceName {
        /// The rejected input.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The remote catalog could not be reached or answered non-2xx.
    #[error("catalog unreachable at {url}: {message}")]
    CatalogUnreachable {
        /// URL that was requested.
        url: String,
        /// Transport error or HTTP status.
        message: String,
    },

    /// The catalog answered with a body of an unexpected shape.
    #[error("malformed catalog response from {url}: {message}")]
    CatalogMalformed {
        /// URL that was requested.
        url: String,
        /// Description of the shape mismatch.
        message: String,
    },

    /// The catalog has no entry for the requested service.
    #[error("service '{service}' not found in catalog")]
    ServiceNotInCatalog {
        /// Requested service.
        service: String,
    },

    /// A raw file download failed.
    #[error("failed to download {url}: {message}")]
    DownloadFailed {
        /// URL of the file.
        url: String,
        /// Transport error or HTTP status.
        message: String,
    },

    /// A strategy cannot run in the current environment.
    #[error("{strategy} unavailable: {reason}")]
    StrategyUnavailable {
        /// The strategy that was skipped.
        strategy: FetchStrategy,
        /// Why it could not run.
        reason: String,
    },

    /// Every acquisition strategy failed.
    #[error("could not acquire service '{service}'; tried:{}", render_attempts(.attempts))]
    AcquisitionFailed {
        /// Requested service.
        service: String,
        /// Per-strategy failures, in the order they were attempted.
        attempts: Vec<StrategyFailure>,
    },

    /// An external binary is not on the `PATH`.
    #[error("{binary} is not installed or not in PATH ({hint})")]
    BinaryNotFound {
        /// Name of the missing binary.
        binary: String,
        /// Installation hint for the user.
        hint: String,
    },

    /// An external binary exited with a non-zero status.
    #[error("{binary} {verb} failed with code {code}{}", render_stderr(.stderr))]
    NonZeroExit {
        /// Binary that was run.
        binary: String,
        /// Subcommand that was run.
        verb: String,
        /// Exit code.
        code: i32,
        /// Captured standard error, empty in inherited mode.
        stderr: String,
    },

    /// An external binary was terminated by a signal.
    #[error("{binary} {verb} terminated by signal {signal}")]
    SignalTerminated {
        /// Binary that was run.
        binary: String,
        /// Subcommand that was run.
        verb: String,
        /// Signal number (0 when unknown).
        signal: i32,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value or user input is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// A YAML document could not be parsed.
    #[error("YAML error: {source}")]
    Yaml {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },
}

impl EasyError {
    /// Builds an [`EasyError::Io`] from a path and an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors the CLI should answer with install instructions.
    #[must_use]
    pub const fn is_binary_not_found(&self) -> bool {
        matches!(self, Self::BinaryNotFound { .. })
    }
}

/// One failed strategy inside [`EasyError::AcquisitionFailed`].
#[derive(Debug)]
pub struct StrategyFailure {
    /// Strategy that was attempted.
    pub strategy: FetchStrategy,
    /// Why it failed.
    pub error: Box<EasyError>,
}

impl StrategyFailure {
    /// Records a failed strategy attempt.
    #[must_use]
    pub fn new(strategy: FetchStrategy, error: EasyError) -> Self {
        Self {
            strategy,
            error: Box::new(error),
        }
    }
}

fn render_attempts(attempts: &[StrategyFailure]) -> String {
    if attempts.is_empty() {
        return " no strategies configured".into();
    }
    let mut out = String::new();
    for (i, attempt) in attempts.iter().enumerate() {
        let _ = write!(out, "\n  {}. {}: {}", i + 1, attempt.strategy, attempt.error);
    }
    out
}

fn render_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{trimmed}")
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, EasyError>;
