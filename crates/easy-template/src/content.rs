//! Generated bundle content.

use std::fmt::Write as _;

use easy_common::constants::{BIN_NAME, DESCRIPTOR_FILE, README_FILE};

/// Files of a generated bundle, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleContent {
    /// Compose descriptor text.
    pub descriptor: String,
    /// Readme text.
    pub readme: String,
    /// Label of the template that produced this content.
    pub template: String,
}

impl BundleContent {
    /// Returns `(file name, contents)` pairs in write order.
    ///
    /// The descriptor comes last so a bundle interrupted mid-write is
    /// still seen as not installed.
    #[must_use]
    pub fn files(&self) -> [(&'static str, &str); 2] {
        [
            (README_FILE, self.readme.as_str()),
            (DESCRIPTOR_FILE, self.descriptor.as_str()),
        ]
    }
}

/// Renders the readme shipped with every generated bundle.
pub(crate) fn readme(service: &str, template: &str, notes: &[&str]) -> String {
    let mut out = format!(
        "# {service}\n\n\
         ## Quick Start\n\n\
         ```bash\n\
         # Start the service\n\
         {BIN_NAME} up {service}\n\n\
         # Stop the service\n\
         {BIN_NAME} down {service}\n\n\
         # View logs\n\
         {BIN_NAME} logs {service}\n\n\
         # Restart the service\n\
         {BIN_NAME} restart {service}\n\
         ```\n\n\
         ## Configuration\n\n\
         Edit `{DESCRIPTOR_FILE}` to customize your service configuration.\n\n\
         ## Notes\n\n\
         - Generated by easy-containers\n\
         - Template: {template}\n"
    );
    for note in notes {
        let _ = writeln!(out, "- {note}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_write_descriptor_last() {
        let content = BundleContent {
            descriptor: "services: {}\n".into(),
            readme: "# x\n".into(),
            template: "generic".into(),
        };
        let files = content.files();
        assert_eq!(files[0].0, "README.md");
        assert_eq!(files[1].0, "docker-compose.yml");
    }

    #[test]
    fn readme_mentions_service_template_and_notes() {
        let text = readme("cache", "redis", &["Default port 6379"]);
        assert!(text.starts_with("# cache\n"));
        assert!(text.contains("easy up cache"));
        assert!(text.contains("- Template: redis"));
        assert!(text.ends_with("- Default port 6379\n"));
    }
}
