//! Per-invocation wiring of configuration, store and runners.

use std::path::PathBuf;

use anyhow::Context as _;
use easy_acquire::Pipeline;
use easy_catalog::CatalogClient;
use easy_common::config::EasyConfig;
use easy_common::constants;
use easy_common::types::ServiceName;
use easy_runtime::{ComposeRunner, DockerClient};
use easy_store::BundleStore;

/// Everything a command needs, built once from the global flags.
#[derive(Debug)]
pub struct Context {
    /// Effective configuration.
    pub config: EasyConfig,
    /// Installed bundles.
    pub store: BundleStore,
    /// Network strategies are skipped.
    pub offline: bool,
}

impl Context {
    /// Loads configuration from `home` or the default data directory.
    pub fn load(home: Option<PathBuf>, offline: bool) -> anyhow::Result<Self> {
        let data_dir = home.unwrap_or_else(constants::default_data_dir);
        let config = EasyConfig::load(&data_dir)
            .with_context(|| format!("failed to load configuration from {}", data_dir.display()))?;
        let store = BundleStore::new(config.services_dir.clone());
        tracing::debug!(data_dir = %data_dir.display(), offline, "context ready");
        Ok(Self {
            config,
            store,
            offline,
        })
    }

    /// Acquisition pipeline honouring `--offline`.
    pub fn pipeline(&self) -> anyhow::Result<Pipeline> {
        if self.offline {
            return Ok(Pipeline::offline(&self.config, self.store.clone()));
        }
        Ok(Pipeline::standard(&self.config, self.store.clone())?)
    }

    /// HTTP client for catalog listings.
    pub fn catalog(&self) -> anyhow::Result<CatalogClient> {
        if self.offline {
            anyhow::bail!("the remote catalog is not available with --offline");
        }
        Ok(CatalogClient::new(self.config.catalog.clone())?)
    }

    /// Orchestration runner from configuration.
    pub fn compose(&self) -> ComposeRunner {
        ComposeRunner::from_config(&self.config)
    }

    /// Introspection client from configuration.
    pub fn docker(&self) -> DockerClient {
        DockerClient::from_config(&self.config)
    }

    /// Path of an installed bundle, without acquiring it.
    ///
    /// Fails with a hint to install when the descriptor is missing.
    pub fn installed(&self, raw: &str) -> anyhow::Result<(ServiceName, PathBuf)> {
        let name = ServiceName::parse(raw)?;
        if !self.store.exists(&name) {
            anyhow::bail!(
                "service \"{name}\" is not installed\nUse \"{bin} up {name}\" or \"{bin} download {name}\" first.",
                bin = constants::BIN_NAME
            );
        }
        let path = self.store.resolve_path(&name);
        Ok((name, path))
    }
}
