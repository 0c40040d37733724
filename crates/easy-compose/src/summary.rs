//! Condensed view of a descriptor for display.

use crate::descriptor::{ComposeFile, scalar_to_string};

const ENV_PREVIEW: usize = 5;
const VOLUME_PREVIEW: usize = 3;

/// Display summary of one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    /// Service key in the descriptor.
    pub name: String,
    /// Image reference, if set.
    pub image: Option<String>,
    /// All port mappings.
    pub ports: Vec<String>,
    /// First environment entries as `KEY=value`.
    pub environment: Vec<String>,
    /// Environment entries not shown.
    pub more_environment: usize,
    /// First volume mounts.
    pub volumes: Vec<String>,
    /// Volume mounts not shown.
    pub more_volumes: usize,
}

/// Display summary of a whole descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleSummary {
    /// Services in file order.
    pub services: Vec<ServiceSummary>,
    /// Top-level network names.
    pub networks: Vec<String>,
    /// Top-level volume names.
    pub volumes: Vec<String>,
}

/// Builds the display summary of a descriptor.
#[must_use]
pub fn summarize(file: &ComposeFile) -> BundleSummary {
    let services = file
        .services
        .iter()
        .map(|(name, spec)| {
            let env = spec.environment.entries();
            let volumes: Vec<String> = spec.volumes.iter().map(scalar_to_string).collect();
            ServiceSummary {
                name: name.clone(),
                image: spec.image.clone(),
                ports: spec.ports.iter().map(scalar_to_string).collect(),
                more_environment: env.len().saturating_sub(ENV_PREVIEW),
                environment: env.into_iter().take(ENV_PREVIEW).collect(),
                more_volumes: volumes.len().saturating_sub(VOLUME_PREVIEW),
                volumes: volumes.into_iter().take(VOLUME_PREVIEW).collect(),
            }
        })
        .collect();
    BundleSummary {
        services,
        networks: file.network_names(),
        volumes: file.volume_names(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_truncates_environment_and_volumes() {
        let file = ComposeFile::parse(
            "services:\n  app:\n    image: app:1\n    ports: [\"80:80\", 443]\n    environment:\n      - A=1\n      - B=2\n      - C=3\n      - D=4\n      - E=5\n      - F=6\n      - G=7\n    volumes:\n      - a:/a\n      - b:/b\n      - c:/c\n      - d:/d\nvolumes:\n  a:\n",
        )
        .expect("parse");

        let summary = summarize(&file);
        let app = &summary.services[0];
        assert_eq!(app.image.as_deref(), Some("app:1"));
        assert_eq!(app.ports, vec!["80:80", "443"]);
        assert_eq!(app.environment, vec!["A=1", "B=2", "C=3", "D=4", "E=5"]);
        assert_eq!(app.more_environment, 2);
        assert_eq!(app.volumes, vec!["a:/a", "b:/b", "c:/c"]);
        assert_eq!(app.more_volumes, 1);
        assert_eq!(summary.volumes, vec!["a"]);
        assert!(summary.networks.is_empty());
    }

    #[test]
    fn summarize_short_lists_have_no_remainder() {
        let file = ComposeFile::parse("services:\n  db:\n    image: postgres\n").expect("parse");
        let db = &summarize(&file).services[0];
        assert_eq!(db.more_environment, 0);
        assert_eq!(db.more_volumes, 0);
        assert!(db.ports.is_empty());
    }
}
