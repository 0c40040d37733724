//! Copy from a local clone of the catalog repository.

use std::path::{Path, PathBuf};

use easy_common::constants::DESCRIPTOR_FILE;
use easy_common::error::{EasyError, Result};
use easy_common::types::{FetchStrategy, ServiceName};
use easy_store::BundleStore;
use easy_store::copy::copy_tree;

use super::AcquisitionStrategy;
use crate::staging::Staging;

/// Copies `<services_dir>/<name>` out of a mirror on disk.
#[derive(Debug, Clone)]
pub struct MirrorCopy {
    services_dir: PathBuf,
}

impl MirrorCopy {
    /// Creates the strategy for a mirror whose services live under
    /// `<mirror_root>/<services_root>`.
    #[must_use]
    pub fn new(mirror_root: &Path, services_root: &str) -> Self {
        Self {
            services_dir: mirror_root.join(services_root.trim_matches('/')),
        }
    }

    /// Directory holding the mirrored services.
    #[must_use]
    pub fn services_dir(&self) -> &Path {
        &self.services_dir
    }
}

impl AcquisitionStrategy for MirrorCopy {
    fn kind(&self) -> FetchStrategy {
        FetchStrategy::LocalMirrorCopy
    }

    fn attempt(&self, name: &ServiceName, store: &BundleStore) -> Result<PathBuf> {
        let source = self.services_dir.join(name.as_str());
        if !source.join(DESCRIPTOR_FILE).is_file() {
            return Err(EasyError::StrategyUnavailable {
                strategy: self.kind(),
                reason: format!("no mirrored bundle at {}", source.display()),
            });
        }

        let staging = Staging::new(store, name)?;
        let files = copy_tree(&source, staging.bundle_dir())?;
        tracing::debug!(service = %name, files, "copied bundle from mirror");
        staging.commit(store, name)
    }
}
