//! Sparse network fetch: check out only the service's subtree.

use std::path::PathBuf;

use easy_common::error::{EasyError, Result};
use easy_common::types::{FetchStrategy, ServiceName};
use easy_store::BundleStore;

use super::AcquisitionStrategy;
use crate::git::TreeFetcher;
use crate::staging::Staging;

/// Fetches `<services_root>/<name>` through a [`TreeFetcher`].
pub struct SparseFetch {
    fetcher: Box<dyn TreeFetcher>,
    services_root: String,
}

impl SparseFetch {
    /// Creates the strategy for catalog services under `services_root`.
    #[must_use]
    pub fn new(fetcher: Box<dyn TreeFetcher>, services_root: impl Into<String>) -> Self {
        Self {
            fetcher,
            services_root: services_root.into(),
        }
    }
}

impl AcquisitionStrategy for SparseFetch {
    fn kind(&self) -> FetchStrategy {
        FetchStrategy::SparseNetworkFetch
    }

    fn attempt(&self, name: &ServiceName, store: &BundleStore) -> Result<PathBuf> {
        let staging = Staging::new(store, name)?;
        let subtree = format!("{}/{name}", self.services_root.trim_matches('/'));
        let checkout = staging.path().join("checkout");

        let local = self.fetcher.fetch_subtree(&subtree, &checkout)?;
        if !local.is_dir() {
            return Err(EasyError::ServiceNotInCatalog {
                service: name.to_string(),
            });
        }
        staging.commit_from(&local, store, name)
    }
}
