//! Staging directories for in-flight acquisitions.
//!
//! Each attempt writes into a hidden, uniquely named directory inside the
//! bundle root and renames the finished bundle into place. Staging and
//! final path share a filesystem, so the rename is atomic. The staging
//! directory is deleted when dropped, whether or not it was committed.

use std::path::{Path, PathBuf};

use easy_common::constants::{DESCRIPTOR_FILE, STAGING_PREFIX};
use easy_common::error::{EasyError, Result};
use easy_common::types::ServiceName;
use easy_store::BundleStore;
use tempfile::TempDir;

/// A uniquely named scratch directory for one acquisition attempt.
#[derive(Debug)]
pub struct Staging {
    dir: TempDir,
    bundle: PathBuf,
}

impl Staging {
    /// Creates `.staging-<name>-XXXXXX` inside the bundle root.
    ///
    /// # Errors
    ///
    /// Returns an error if the root or the staging directory cannot be
    /// created.
    pub fn new(store: &BundleStore, name: &ServiceName) -> Result<Self> {
        store.ensure_root()?;
        let dir = tempfile::Builder::new()
            .prefix(&format!("{STAGING_PREFIX}{name}-"))
            .tempdir_in(store.root())
            .map_err(|e| EasyError::io(store.root(), e))?;
        let bundle = dir.path().join(name.as_str());
        tracing::debug!(service = %name, path = %dir.path().display(), "created staging directory");
        Ok(Self { dir, bundle })
    }

    /// Root of the staging directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Directory where a strategy assembles the bundle. Not created.
    #[must_use]
    pub fn bundle_dir(&self) -> &Path {
        &self.bundle
    }

    /// Moves the staged bundle into its final location.
    ///
    /// Equivalent to [`Staging::commit_from`] with [`Staging::bundle_dir`].
    ///
    /// # Errors
    ///
    /// See [`Staging::commit_from`].
    pub fn commit(self, store: &BundleStore, name: &ServiceName) -> Result<PathBuf> {
        let bundle = self.bundle.clone();
        self.commit_from(&bundle, store, name)
    }

    /// Moves `subtree` (inside this staging directory) to the bundle path.
    ///
    /// If the rename fails because another invocation installed a complete
    /// bundle first, that bundle is kept and reported as the result.
    ///
    /// # Errors
    ///
    /// Returns [`EasyError::NotFound`] if the staged tree has no descriptor,
    /// or an I/O error if the rename fails and no complete bundle exists.
    pub fn commit_from(self, subtree: &Path, store: &BundleStore, name: &ServiceName) -> Result<PathBuf> {
        if !subtree.join(DESCRIPTOR_FILE).is_file() {
            return Err(EasyError::NotFound {
                kind: "descriptor",
                id: format!("{name}/{DESCRIPTOR_FILE}"),
            });
        }
        let target = store.resolve_path(name);
        match std::fs::rename(subtree, &target) {
            Ok(()) => {
                tracing::debug!(service = %name, path = %target.display(), "committed staged bundle");
                Ok(target)
            }
            Err(_) if store.exists(name) => {
                tracing::info!(service = %name, "bundle installed concurrently, keeping existing copy");
                Ok(target)
            }
            Err(e) => Err(EasyError::io(&target, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> ServiceName {
        ServiceName::parse(raw).expect("name")
    }

    fn write_bundle(dir: &Path, descriptor: &str) {
        std::fs::create_dir_all(dir).expect("mkdir");
        std::fs::write(dir.join(DESCRIPTOR_FILE), descriptor).expect("write");
    }

    #[test]
    fn staging_is_hidden_and_unique() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = BundleStore::new(dir.path().join("services"));
        let a = Staging::new(&store, &name("redis")).expect("staging");
        let b = Staging::new(&store, &name("redis")).expect("staging");

        assert_ne!(a.path(), b.path());
        let file_name = a.path().file_name().and_then(|n| n.to_str()).expect("name");
        assert!(file_name.starts_with(".staging-redis-"));
        assert!(store.list_installed().expect("list").is_empty());
    }

    #[test]
    fn commit_moves_bundle_and_removes_staging() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = BundleStore::new(dir.path());
        let staging = Staging::new(&store, &name("redis")).expect("staging");
        let staging_root = staging.path().to_path_buf();
        write_bundle(staging.bundle_dir(), "services: {}\n");

        let path = staging.commit(&store, &name("redis")).expect("commit");

        assert_eq!(path, dir.path().join("redis"));
        assert!(store.exists(&name("redis")));
        assert!(!staging_root.exists());
    }

    #[test]
    fn commit_without_descriptor_fails_and_leaves_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = BundleStore::new(dir.path());
        let staging = Staging::new(&store, &name("redis")).expect("staging");
        std::fs::create_dir_all(staging.bundle_dir()).expect("mkdir");
        std::fs::write(staging.bundle_dir().join("README.md"), "# x").expect("write");

        let err = staging.commit(&store, &name("redis")).unwrap_err();

        assert!(matches!(err, EasyError::NotFound { kind: "descriptor", .. }));
        assert_eq!(std::fs::read_dir(dir.path()).expect("read").count(), 0);
    }

    #[test]
    fn commit_keeps_concurrently_installed_bundle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = BundleStore::new(dir.path());
        write_bundle(&dir.path().join("redis"), "first\n");

        let staging = Staging::new(&store, &name("redis")).expect("staging");
        write_bundle(staging.bundle_dir(), "second\n");
        let path = staging.commit(&store, &name("redis")).expect("commit");

        let kept = std::fs::read_to_string(path.join(DESCRIPTOR_FILE)).expect("read");
        assert_eq!(kept, "first\n");
    }
}
