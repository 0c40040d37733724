//! Catalog listing entries.

use serde::{Deserialize, Serialize};

/// Kind of a catalog entry. Only directories are installable services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A directory: one service bundle.
    Dir,
    /// A plain file.
    File,
    /// Symlinks, submodules and anything else the remote reports.
    #[serde(other)]
    Other,
}

/// One element of a catalog listing. Extra JSON fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Entry name (service name or file name).
    pub name: String,
    /// Entry kind, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl CatalogEntry {
    /// Creates a directory entry.
    #[must_use]
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
        }
    }

    /// Creates a file entry.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }
}

/// Reduces a listing to installable service names.
///
/// Keeps directories only, drops names starting with `hidden_prefix`,
/// then sorts and deduplicates.
#[must_use]
pub fn service_names(entries: &[CatalogEntry], hidden_prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = entries
        .iter()
        .filter(|e| e.kind == EntryKind::Dir)
        .filter(|e| hidden_prefix.is_empty() || !e.name.starts_with(hidden_prefix))
        .map(|e| e.name.clone())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Reduces a per-service listing to the names of its plain files.
///
/// Names that could escape the bundle directory are dropped.
#[must_use]
pub fn file_names(entries: &[CatalogEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.kind == EntryKind::File)
        .filter(|e| {
            let safe = is_safe_file_name(&e.name);
            if !safe {
                tracing::warn!(file = %e.name, "ignoring unsafe file name in catalog listing");
            }
            safe
        })
        .map(|e| e.name.clone())
        .collect()
}

fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_github_shape_ignores_extra_fields() {
        let json = r#"[
            {"name": "redis", "path": "services/redis", "sha": "abc", "type": "dir"},
            {"name": "README.md", "type": "file", "size": 12},
            {"name": "link", "type": "symlink"}
        ]"#;
        let entries: Vec<CatalogEntry> = serde_json::from_str(json).expect("parse");
        assert_eq!(entries[0], CatalogEntry::dir("redis"));
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[2].kind, EntryKind::Other);
    }

    #[test]
    fn service_names_filters_sorts_and_dedups() {
        let entries = vec![
            CatalogEntry::dir("redis"),
            CatalogEntry::file("README.md"),
            CatalogEntry::dir(".github"),
            CatalogEntry::dir("kafka"),
            CatalogEntry::dir("redis"),
            CatalogEntry::dir("postgres"),
        ];
        assert_eq!(
            service_names(&entries, "."),
            vec!["kafka", "postgres", "redis"]
        );
    }

    #[test]
    fn service_names_empty_prefix_keeps_everything() {
        let entries = vec![CatalogEntry::dir(".hidden"), CatalogEntry::dir("a")];
        assert_eq!(service_names(&entries, ""), vec![".hidden", "a"]);
    }

    #[test]
    fn file_names_keeps_files_and_drops_unsafe() {
        let entries = vec![
            CatalogEntry::file("docker-compose.yml"),
            CatalogEntry::dir("conf"),
            CatalogEntry::file("../escape"),
            CatalogEntry::file(".env.example"),
        ];
        assert_eq!(
            file_names(&entries),
            vec!["docker-compose.yml", ".env.example"]
        );
    }
}
