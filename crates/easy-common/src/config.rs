//! Global configuration model for easy-containers.
//!
//! A single [`EasyConfig`] is built once per invocation and injected into
//! the store, catalog client, pipeline and runners. Nothing reads the
//! bundle root from ambient global state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{EasyError, Result};

/// Remote catalog endpoints and request settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the contents API (`<api_base>/contents/<services_root>`).
    pub api_base: String,
    /// Base URL serving raw file content.
    pub raw_base: String,
    /// Git URL of the catalog repository, used for sparse fetches.
    pub repo_url: String,
    /// Branch to read from.
    pub branch: String,
    /// Directory of the repository holding the services.
    pub services_root: String,
    /// Entries starting with this prefix are hidden from listings.
    pub hidden_prefix: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let repo = constants::CATALOG_REPO;
        let branch = constants::CATALOG_BRANCH;
        Self {
            api_base: format!("https://api.github.com/repos/{repo}"),
            raw_base: format!("https://raw.githubusercontent.com/{repo}/{branch}"),
            repo_url: format!("https://github.com/{repo}.git"),
            branch: branch.to_string(),
            services_root: constants::SERVICES_ROOT.to_string(),
            hidden_prefix: ".".to_string(),
            user_agent: constants::USER_AGENT.to_string(),
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Root configuration for easy-containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EasyConfig {
    /// Base directory for all state.
    pub data_dir: PathBuf,
    /// Bundle root: one subdirectory per installed service.
    pub services_dir: PathBuf,
    /// Where `update` keeps timestamped copies of replaced bundles.
    pub backups_dir: PathBuf,
    /// Local clone of the catalog repository used as an offline source.
    pub mirror_dir: PathBuf,
    /// Remote catalog settings.
    pub catalog: CatalogConfig,
    /// Orchestration binary (run with the bundle as working directory).
    pub compose_binary: String,
    /// Arguments placed before every orchestration verb (e.g. `compose`).
    pub compose_args: Vec<String>,
    /// Container introspection binary.
    pub docker_binary: String,
    /// Git binary used by the sparse fetch strategy.
    pub git_binary: String,
}

impl Default for EasyConfig {
    fn default() -> Self {
        Self::with_data_dir(constants::default_data_dir())
    }
}

impl EasyConfig {
    /// Builds the default layout rooted at `data_dir`.
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            services_dir: data_dir.join("services"),
            backups_dir: data_dir.join("backups"),
            mirror_dir: data_dir.join("mirror"),
            data_dir,
            catalog: CatalogConfig::default(),
            compose_binary: constants::COMPOSE_BINARY.to_string(),
            compose_args: Vec::new(),
            docker_binary: constants::DOCKER_BINARY.to_string(),
            git_binary: constants::GIT_BINARY.to_string(),
        }
    }

    /// Loads `<data_dir>/config.json` over the defaults for `data_dir`.
    ///
    /// Directory fields left out of the file stay relative to `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(constants::CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::with_data_dir(data_dir));
        }
        let content = std::fs::read_to_string(&path).map_err(|e| EasyError::io(&path, e))?;
        let overrides: serde_json::Value = serde_json::from_str(&content)?;
        let mut base = serde_json::to_value(Self::with_data_dir(data_dir))?;
        merge_json(&mut base, overrides);
        let config: Self = serde_json::from_value(base)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        let _ = base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
