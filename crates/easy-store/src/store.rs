//! Bundle store.
//!
//! Maps a [`ServiceName`] to its directory under the bundle root and
//! answers whether a complete bundle is installed there. The store never
//! creates the root itself; the acquisition pipeline does that lazily on
//! its first write.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use easy_common::constants::DESCRIPTOR_FILE;
use easy_common::error::{EasyError, Result};
use easy_common::types::ServiceName;

/// Manages the on-disk layout of installed service bundles.
#[derive(Debug, Clone)]
pub struct BundleStore {
    /// Root directory holding one subdirectory per service.
    root: PathBuf,
}

impl BundleStore {
    /// Creates a store rooted at the given directory. Performs no I/O.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the bundle root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory of a service's bundle.
    #[must_use]
    pub fn resolve_path(&self, name: &ServiceName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Validates a raw name and returns its bundle directory.
    ///
    /// # Errors
    ///
    /// Returns [`EasyError::InvalidServiceName`] for names that would
    /// escape the bundle root.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf> {
        ServiceName::parse(raw).map(|name| self.resolve_path(&name))
    }

    /// Returns the path of a service's compose descriptor.
    #[must_use]
    pub fn descriptor_path(&self, name: &ServiceName) -> PathBuf {
        self.resolve_path(name).join(DESCRIPTOR_FILE)
    }

    /// Returns `true` when the bundle directory exists and holds a descriptor.
    ///
    /// A directory without a descriptor is a partial download and counts
    /// as not installed.
    #[must_use]
    pub fn exists(&self, name: &ServiceName) -> bool {
        self.resolve_path(name).is_dir() && self.descriptor_path(name).is_file()
    }

    /// Returns `true` when a directory exists for the service, complete or not.
    #[must_use]
    pub fn has_directory(&self, name: &ServiceName) -> bool {
        self.resolve_path(name).is_dir()
    }

    /// Lists the names of all bundle directories, sorted.
    ///
    /// Descriptor presence is not checked. Hidden entries (staging
    /// directories) and plain files are skipped. A missing root yields an
    /// empty set.
    ///
    /// # Errors
    ///
    /// Returns an error if the root exists but cannot be read.
    pub fn list_installed(&self) -> Result<BTreeSet<ServiceName>> {
        if !self.root.is_dir() {
            return Ok(BTreeSet::new());
        }
        let entries = std::fs::read_dir(&self.root).map_err(|e| EasyError::io(&self.root, e))?;

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| EasyError::io(&self.root, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(raw) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if let Ok(name) = ServiceName::parse(&raw) {
                let _ = names.insert(name);
            }
        }
        tracing::debug!(root = %self.root.display(), count = names.len(), "listed installed bundles");
        Ok(names)
    }

    /// Creates the bundle root if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| EasyError::io(&self.root, e))
    }

    /// Deletes a service's bundle directory. A missing bundle is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be removed.
    pub fn remove(&self, name: &ServiceName) -> Result<()> {
        let path = self.resolve_path(name);
        if !path.exists() {
            return Ok(());
        }
        tracing::info!(service = %name, path = %path.display(), "removing bundle");
        std::fs::remove_dir_all(&path).map_err(|e| EasyError::io(&path, e))
    }
}
