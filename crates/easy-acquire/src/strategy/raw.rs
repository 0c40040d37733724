//! Per-file raw fetch through the catalog API.

use std::path::PathBuf;
use std::sync::Arc;

use easy_catalog::CatalogSource;
use easy_common::constants::DESCRIPTOR_FILE;
use easy_common::error::{EasyError, Result};
use easy_common::types::{FetchStrategy, ServiceName};
use easy_store::BundleStore;

use super::AcquisitionStrategy;
use crate::staging::Staging;

/// Lists a service's files and downloads them one by one.
///
/// Only top-level files are fetched. Any failed download aborts the
/// attempt and the staged files are discarded.
pub struct RawFetch {
    source: Arc<dyn CatalogSource>,
}

impl RawFetch {
    /// Creates the strategy over a catalog source.
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }
}

impl AcquisitionStrategy for RawFetch {
    fn kind(&self) -> FetchStrategy {
        FetchStrategy::RawFileFetch
    }

    fn attempt(&self, name: &ServiceName, store: &BundleStore) -> Result<PathBuf> {
        let files = self.source.list_files(name)?;
        if !files.iter().any(|f| f == DESCRIPTOR_FILE) {
            return Err(EasyError::NotFound {
                kind: "descriptor",
                id: format!("{name}/{DESCRIPTOR_FILE} in catalog listing"),
            });
        }

        let staging = Staging::new(store, name)?;
        let dir = staging.bundle_dir().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| EasyError::io(&dir, e))?;
        for file in &files {
            let bytes = self.source.fetch_file_content(name, file)?;
            let path = dir.join(file);
            std::fs::write(&path, &bytes).map_err(|e| EasyError::io(&path, e))?;
            tracing::debug!(service = %name, file = %file, bytes = bytes.len(), "downloaded file");
        }
        staging.commit(store, name)
    }
}
