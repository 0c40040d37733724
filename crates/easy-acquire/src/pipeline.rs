//! The acquisition pipeline.
//!
//! [`Pipeline::ensure_bundle`] is idempotent: an installed bundle is
//! returned untouched, otherwise the first strategy that succeeds installs
//! it. Only when every strategy fails does the caller see an error, and
//! that error lists each attempt in order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use easy_catalog::{CatalogClient, CatalogSource};
use easy_common::config::EasyConfig;
use easy_common::error::{EasyError, Result, StrategyFailure};
use easy_common::types::{FetchStrategy, ServiceName};
use easy_store::BundleStore;
use easy_store::copy::copy_tree;
use easy_template::InitTemplate;

use crate::git::GitTreeFetcher;
use crate::strategy::template::write_content;
use crate::strategy::{
    AcquisitionStrategy, MirrorCopy, RawFetch, SparseFetch, TemplateSynthesis,
};

/// Outcome of [`Pipeline::ensure_bundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquired {
    /// Bundle directory.
    pub path: PathBuf,
    /// Strategy that installed the bundle, `None` if it was already present.
    pub source: Option<FetchStrategy>,
}

impl Acquired {
    /// Returns `true` if this call installed the bundle.
    #[must_use]
    pub const fn was_installed(&self) -> bool {
        self.source.is_some()
    }
}

/// Outcome of [`Pipeline::update_bundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Updated {
    /// The freshly acquired bundle.
    pub acquired: Acquired,
    /// Copy of the previous bundle, if one was installed.
    pub backup: Option<PathBuf>,
}

/// Ordered chain of acquisition strategies over one bundle store.
pub struct Pipeline {
    store: BundleStore,
    strategies: Vec<Box<dyn AcquisitionStrategy>>,
    backups_dir: PathBuf,
}

impl Pipeline {
    /// Builds the full chain: sparse fetch, raw fetch, mirror copy, template.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be built.
    pub fn standard(config: &EasyConfig, store: BundleStore) -> Result<Self> {
        let catalog: Arc<dyn CatalogSource> = Arc::new(CatalogClient::new(config.catalog.clone())?);
        Ok(Self::standard_with_source(config, store, catalog))
    }

    /// Builds the full chain around an existing catalog source.
    #[must_use]
    pub fn standard_with_source(
        config: &EasyConfig,
        store: BundleStore,
        catalog: Arc<dyn CatalogSource>,
    ) -> Self {
        let strategies: Vec<Box<dyn AcquisitionStrategy>> = vec![
            Box::new(SparseFetch::new(
                Box::new(GitTreeFetcher::from_config(config)),
                config.catalog.services_root.clone(),
            )),
            Box::new(RawFetch::new(catalog)),
            Box::new(MirrorCopy::new(&config.mirror_dir, &config.catalog.services_root)),
            Box::new(TemplateSynthesis),
        ];
        Self::with_strategies(store, strategies).backups_in(&config.backups_dir)
    }

    /// Builds the chain without network strategies: mirror copy, template.
    #[must_use]
    pub fn offline(config: &EasyConfig, store: BundleStore) -> Self {
        let strategies: Vec<Box<dyn AcquisitionStrategy>> = vec![
            Box::new(MirrorCopy::new(&config.mirror_dir, &config.catalog.services_root)),
            Box::new(TemplateSynthesis),
        ];
        Self::with_strategies(store, strategies).backups_in(&config.backups_dir)
    }

    /// Builds a pipeline from a custom strategy chain.
    ///
    /// Backups default to a `backups` directory next to the bundle root.
    #[must_use]
    pub fn with_strategies(store: BundleStore, strategies: Vec<Box<dyn AcquisitionStrategy>>) -> Self {
        let backups_dir = store.root().with_file_name("backups");
        Self {
            store,
            strategies,
            backups_dir,
        }
    }

    /// Sets where [`Pipeline::update_bundle`] keeps backups.
    #[must_use]
    pub fn backups_in(mut self, dir: &Path) -> Self {
        self.backups_dir = dir.to_path_buf();
        self
    }

    /// The bundle store this pipeline installs into.
    #[must_use]
    pub const fn store(&self) -> &BundleStore {
        &self.store
    }

    /// Strategy kinds in the order they are tried.
    #[must_use]
    pub fn order(&self) -> Vec<FetchStrategy> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    /// Parses `raw` and ensures its bundle.
    ///
    /// # Errors
    ///
    /// Returns [`EasyError::InvalidServiceName`] before any filesystem
    /// access, or any error from [`Pipeline::ensure_bundle`].
    pub fn ensure(&self, raw: &str) -> Result<Acquired> {
        let name = ServiceName::parse(raw)?;
        self.ensure_bundle(&name)
    }

    /// Guarantees a complete bundle for `name` exists and returns its path.
    ///
    /// A directory without a descriptor is a leftover partial bundle and is
    /// removed before the strategies run.
    ///
    /// # Errors
    ///
    /// Returns [`EasyError::AcquisitionFailed`] listing every attempt if no
    /// strategy succeeds.
    pub fn ensure_bundle(&self, name: &ServiceName) -> Result<Acquired> {
        let path = self.store.resolve_path(name);
        if self.store.exists(name) {
            tracing::debug!(service = %name, path = %path.display(), "bundle already installed");
            return Ok(Acquired { path, source: None });
        }
        self.discard_partial(name)?;

        let mut attempts = Vec::new();
        for strategy in &self.strategies {
            let kind = strategy.kind();
            tracing::debug!(service = %name, strategy = %kind, "attempting strategy");
            match strategy.attempt(name, &self.store) {
                Ok(path) => {
                    tracing::info!(service = %name, strategy = %kind, path = %path.display(), "bundle installed");
                    return Ok(Acquired {
                        path,
                        source: Some(kind),
                    });
                }
                Err(error) => {
                    tracing::warn!(service = %name, strategy = %kind, error = %error, "strategy failed, falling back");
                    self.discard_partial(name)?;
                    attempts.push(StrategyFailure::new(kind, error));
                }
            }
        }

        Err(EasyError::AcquisitionFailed {
            service: name.to_string(),
            attempts,
        })
    }

    /// Replaces an installed bundle with a freshly acquired one.
    ///
    /// The old bundle is copied to `<backups>/<name>-<YYYYmmdd-HHMMSS>`
    /// first. If re-acquisition fails the backup stays where it is and the
    /// error is returned; nothing is restored automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup cannot be taken, the bundle cannot be
    /// removed, or re-acquisition fails.
    pub fn update_bundle(&self, name: &ServiceName) -> Result<Updated> {
        let backup = if self.store.has_directory(name) {
            let backup = self.backup(name)?;
            self.store.remove(name)?;
            Some(backup)
        } else {
            None
        };

        match self.ensure_bundle(name) {
            Ok(acquired) => Ok(Updated { acquired, backup }),
            Err(error) => {
                if let Some(backup) = &backup {
                    tracing::error!(service = %name, backup = %backup.display(), "update failed, backup kept for manual recovery");
                }
                Err(error)
            }
        }
    }

    /// Creates a bundle from a starter template.
    ///
    /// # Errors
    ///
    /// Returns [`EasyError::Config`] if the bundle already exists and
    /// `overwrite` is false, or an error if the files cannot be written.
    pub fn init_bundle(&self, name: &ServiceName, template: InitTemplate, overwrite: bool) -> Result<PathBuf> {
        let path = self.store.resolve_path(name);
        if self.store.has_directory(name) && !overwrite {
            return Err(EasyError::Config {
                message: format!("service '{name}' already exists at {}", path.display()),
            });
        }
        let content = template.render(name.as_str());
        write_content(&path, &content)?;
        tracing::info!(service = %name, template = %template, path = %path.display(), "initialized bundle");
        Ok(path)
    }

    fn backup(&self, name: &ServiceName) -> Result<PathBuf> {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let base = format!("{name}-{stamp}");
        let mut target = self.backups_dir.join(&base);
        let mut suffix = 1;
        while target.exists() {
            target = self.backups_dir.join(format!("{base}-{suffix}"));
            suffix += 1;
        }
        let files = copy_tree(&self.store.resolve_path(name), &target)?;
        tracing::info!(service = %name, backup = %target.display(), files, "backed up bundle");
        Ok(target)
    }

    fn discard_partial(&self, name: &ServiceName) -> Result<()> {
        if self.store.has_directory(name) && !self.store.exists(name) {
            tracing::warn!(service = %name, "removing incomplete bundle directory");
            self.store.remove(name)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("store", &self.store)
            .field("order", &self.order())
            .field("backups_dir", &self.backups_dir)
            .finish()
    }
}
