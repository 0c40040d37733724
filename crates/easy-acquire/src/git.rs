//! Sparse subtree checkout through the `git` binary.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use easy_common::config::EasyConfig;
use easy_common::error::{EasyError, Result};

/// Fetches one subtree of a remote repository into a local directory.
pub trait TreeFetcher: Send + Sync {
    /// Materializes `subtree` (a `/`-separated repository path) under
    /// `dest` and returns the local path of the subtree.
    ///
    /// `dest` must not exist yet. On error the caller discards `dest`
    /// wholesale, so partial output is allowed.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or subtree cannot be fetched.
    fn fetch_subtree(&self, subtree: &str, dest: &Path) -> Result<PathBuf>;
}

/// [`TreeFetcher`] backed by a shallow, blob-less sparse `git clone`.
#[derive(Debug, Clone)]
pub struct GitTreeFetcher {
    binary: String,
    repo_url: String,
    branch: String,
}

impl GitTreeFetcher {
    /// Creates a fetcher for `repo_url` at `branch`.
    #[must_use]
    pub fn new(binary: impl Into<String>, repo_url: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            repo_url: repo_url.into(),
            branch: branch.into(),
        }
    }

    /// Creates a fetcher for the configured catalog repository.
    #[must_use]
    pub fn from_config(config: &EasyConfig) -> Self {
        Self::new(&config.git_binary, &config.catalog.repo_url, &config.catalog.branch)
    }

    fn locate(&self) -> Result<PathBuf> {
        which::which(&self.binary).map_err(|_| EasyError::BinaryNotFound {
            binary: self.binary.clone(),
            hint: "install git from https://git-scm.com/downloads".into(),
        })
    }

    fn run<I, S>(&self, git: &Path, verb: &str, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(git)
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| EasyError::io(git, e))?;
        if output.status.success() {
            return Ok(());
        }
        Err(EasyError::NonZeroExit {
            binary: self.binary.clone(),
            verb: verb.to_string(),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl TreeFetcher for GitTreeFetcher {
    fn fetch_subtree(&self, subtree: &str, dest: &Path) -> Result<PathBuf> {
        let git = self.locate()?;
        tracing::debug!(repo = %self.repo_url, branch = %self.branch, subtree, "sparse clone");

        self.run(
            &git,
            "clone",
            [
                OsStr::new("clone"),
                OsStr::new("--depth"),
                OsStr::new("1"),
                OsStr::new("--filter=blob:none"),
                OsStr::new("--sparse"),
                OsStr::new("--branch"),
                OsStr::new(&self.branch),
                OsStr::new(&self.repo_url),
                dest.as_os_str(),
            ],
        )?;
        self.run(
            &git,
            "sparse-checkout",
            [
                OsStr::new("-C"),
                dest.as_os_str(),
                OsStr::new("sparse-checkout"),
                OsStr::new("set"),
                OsStr::new(subtree),
            ],
        )?;

        Ok(subtree.split('/').fold(dest.to_path_buf(), |path, part| path.join(part)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_subtree_missing_binary_is_binary_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fetcher = GitTreeFetcher::new(
            "easy-containers-no-such-git",
            "https://example.invalid/repo.git",
            "main",
        );
        let err = fetcher
            .fetch_subtree("services/redis", &dir.path().join("checkout"))
            .unwrap_err();
        assert!(err.is_binary_not_found(), "got {err}");
    }

    #[test]
    fn from_config_uses_catalog_repository() {
        let config = EasyConfig::with_data_dir("/tmp/easy");
        let fetcher = GitTreeFetcher::from_config(&config);
        assert_eq!(fetcher.binary, "git");
        assert!(fetcher.repo_url.ends_with("easy-containers.git"));
        assert_eq!(fetcher.branch, "main");
    }
}
