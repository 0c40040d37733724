//! Static checks on a compose descriptor.
//!
//! Findings are split into issues, which block deployment, and warnings,
//! which are likely mistakes. The orchestration binary's own `config`
//! check is run separately by the caller and appended as an issue.

use std::path::Path;

use easy_common::constants::DESCRIPTOR_FILE;
use easy_common::error::{EasyError, Result};
use serde_yaml::Value;

use crate::descriptor::{ComposeFile, Environment};

/// Findings of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that prevent the bundle from running.
    pub issues: Vec<String>,
    /// Suspicious but non-fatal findings.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` when there are no issues. Warnings are allowed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns `true` when there are neither issues nor warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.warnings.is_empty()
    }

    /// Records an issue.
    pub fn issue(&mut self, message: impl Into<String>) {
        self.issues.push(message.into());
    }

    /// Records a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Validates a parsed descriptor.
///
/// # Checks performed
///
/// 1. `version` is present (warning).
/// 2. At least one service is defined (issue).
/// 3. Every service has an `image` or a `build` (issue).
/// 4. String ports have the `host:container` digit form (warning).
/// 5. List-form environment entries contain `=` (warning).
/// 6. Named volume mounts are declared at top level (warning).
#[must_use]
pub fn validate(file: &ComposeFile) -> ValidationReport {
    let mut report = ValidationReport::default();

    if file.version().is_none() {
        report.warn(format!("No version specified in {DESCRIPTOR_FILE}"));
    }
    if file.services.is_empty() {
        report.issue("No services defined");
    }

    for (name, spec) in &file.services {
        if spec.image.is_none() && spec.build.is_none() {
            report.issue(format!("Service \"{name}\" has no image or build configuration"));
        }
        for port in &spec.ports {
            if let Value::String(port) = port {
                if !is_simple_port_mapping(port) {
                    report.warn(format!("Service \"{name}\": Port \"{port}\" may have invalid format"));
                }
            }
        }
        if let Environment::List(items) = &spec.environment {
            for item in items.iter().filter(|item| !item.contains('=')) {
                report.warn(format!(
                    "Service \"{name}\": Environment variable \"{item}\" missing value"
                ));
            }
        }
        for volume in &spec.volumes {
            let Some(source) = named_volume(volume) else {
                continue;
            };
            if !file.declares_volume(source) {
                report.warn(format!(
                    "Service \"{name}\": Volume \"{source}\" not defined in top-level volumes"
                ));
            }
        }
    }

    tracing::debug!(
        issues = report.issues.len(),
        warnings = report.warnings.len(),
        "validated descriptor"
    );
    report
}

/// Validates descriptor text; a YAML error becomes an issue.
#[must_use]
pub fn validate_str(text: &str) -> ValidationReport {
    match ComposeFile::parse(text) {
        Ok(file) => validate(&file),
        Err(e) => {
            let mut report = ValidationReport::default();
            report.issue(format!("Invalid YAML syntax: {e}"));
            report
        }
    }
}

/// Validates the descriptor inside a bundle directory.
///
/// # Errors
///
/// Returns [`EasyError::NotFound`] if the bundle has no descriptor, or an
/// I/O error if it cannot be read.
pub fn validate_bundle(dir: &Path) -> Result<ValidationReport> {
    let path = dir.join(DESCRIPTOR_FILE);
    if !path.is_file() {
        return Err(EasyError::NotFound {
            kind: "descriptor",
            id: path.display().to_string(),
        });
    }
    tracing::info!(path = %path.display(), "validating descriptor");
    let text = std::fs::read_to_string(&path).map_err(|e| EasyError::io(&path, e))?;
    Ok(validate_str(&text))
}

fn is_simple_port_mapping(port: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    port.split_once(':')
        .is_some_and(|(host, container)| digits(host) && digits(container))
}

/// Source of a short-syntax `source:target` mount when it names a volume
/// rather than a host path.
fn named_volume(volume: &Value) -> Option<&str> {
    let Value::String(spec) = volume else {
        return None;
    };
    let (source, _) = spec.split_once(':')?;
    if source.is_empty() || source.starts_with(['.', '/', '~']) {
        return None;
    }
    Some(source)
}
