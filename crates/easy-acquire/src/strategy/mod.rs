//! Acquisition strategies.
//!
//! A strategy either installs a complete bundle at the store's final path
//! and returns it, or fails without leaving anything there. The pipeline
//! tries strategies in order and records each failure.

use std::path::PathBuf;

use easy_common::error::Result;
use easy_common::types::{FetchStrategy, ServiceName};
use easy_store::BundleStore;

pub mod mirror;
pub mod raw;
pub mod sparse;
pub mod template;

pub use mirror::MirrorCopy;
pub use raw::RawFetch;
pub use sparse::SparseFetch;
pub use template::TemplateSynthesis;

/// One way of installing a bundle.
pub trait AcquisitionStrategy: Send + Sync {
    /// Which strategy this is, for logs and error reports.
    fn kind(&self) -> FetchStrategy;

    /// Installs `name` into `store` and returns the bundle path.
    ///
    /// # Errors
    ///
    /// Returns the strategy-specific cause of failure.
    fn attempt(&self, name: &ServiceName, store: &BundleStore) -> Result<PathBuf>;
}
