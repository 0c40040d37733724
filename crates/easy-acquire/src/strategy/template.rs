//! Built-in template synthesis, the terminal fallback.

use std::path::{Path, PathBuf};

use easy_common::error::{EasyError, Result};
use easy_common::types::{FetchStrategy, ServiceName};
use easy_store::BundleStore;
use easy_template::BundleContent;

use super::AcquisitionStrategy;
use crate::staging::Staging;

/// Materializes the synthesized template for the service name.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateSynthesis;

impl AcquisitionStrategy for TemplateSynthesis {
    fn kind(&self) -> FetchStrategy {
        FetchStrategy::TemplateSynthesis
    }

    fn attempt(&self, name: &ServiceName, store: &BundleStore) -> Result<PathBuf> {
        let content = easy_template::synthesize(name);
        tracing::info!(service = %name, template = %content.template, "synthesizing bundle");
        let staging = Staging::new(store, name)?;
        write_content(staging.bundle_dir(), &content)?;
        staging.commit(store, name)
    }
}

/// Writes generated content into `dir`, descriptor last.
///
/// # Errors
///
/// Returns an error if the directory or a file cannot be written.
pub fn write_content(dir: &Path, content: &BundleContent) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| EasyError::io(dir, e))?;
    for (file, text) in content.files() {
        let path = dir.join(file);
        std::fs::write(&path, text).map_err(|e| EasyError::io(&path, e))?;
    }
    Ok(())
}
