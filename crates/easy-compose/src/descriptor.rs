//! Compose descriptor model.
//!
//! Only the fields the tool inspects are modelled; everything else in the
//! file is ignored. Service order follows the file.

use std::path::Path;

use easy_common::error::{EasyError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

/// A parsed `docker-compose.yml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComposeFile {
    /// Raw `version` value (string or number).
    pub version: Option<Value>,
    /// Services in file order.
    #[serde(deserialize_with = "ordered_services")]
    pub services: Vec<(String, ServiceSpec)>,
    /// Top-level named volume declarations.
    pub volumes: Option<Mapping>,
    /// Top-level network declarations.
    pub networks: Option<Mapping>,
}

/// One entry under `services`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceSpec {
    /// Image reference.
    pub image: Option<String>,
    /// Build context (string or mapping).
    pub build: Option<Value>,
    /// Port mappings, short or long syntax.
    #[serde(deserialize_with = "null_as_default")]
    pub ports: Vec<Value>,
    /// Environment in list or mapping form.
    #[serde(deserialize_with = "null_as_default")]
    pub environment: Environment,
    /// Volume mounts, short or long syntax.
    #[serde(deserialize_with = "null_as_default")]
    pub volumes: Vec<Value>,
    /// Fixed container name, if any.
    pub container_name: Option<String>,
}

/// `environment:` as either `["K=V", ...]` or `{K: V, ...}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Environment {
    /// List form.
    List(Vec<String>),
    /// Mapping form.
    Map(Mapping),
}

impl Default for Environment {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl Environment {
    /// Entries rendered as `KEY=value` (mapping form) or verbatim (list form).
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            Self::Map(map) => map
                .iter()
                .map(|(k, v)| format!("{}={}", scalar_to_string(k), scalar_to_string(v)))
                .collect(),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::Map(map) => map.len(),
        }
    }

    /// Returns `true` if no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ComposeFile {
    /// Reads and parses a descriptor file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`EasyError::Yaml`] if it is not a valid descriptor.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| EasyError::io(path, e))?;
        Self::parse(&text)
    }

    /// Parses descriptor text. An empty document yields an empty descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`EasyError::Yaml`] on a syntax or shape error.
    pub fn parse(text: &str) -> Result<Self> {
        let file: Option<Self> = serde_yaml::from_str(text)?;
        Ok(file.unwrap_or_default())
    }

    /// The `version` value as text.
    #[must_use]
    pub fn version(&self) -> Option<String> {
        self.version.as_ref().filter(|v| !v.is_null()).map(scalar_to_string)
    }

    /// Looks up a service by name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceSpec> {
        self.services.iter().find(|(n, _)| n == name).map(|(_, spec)| spec)
    }

    /// Names of top-level volumes.
    #[must_use]
    pub fn volume_names(&self) -> Vec<String> {
        keys(self.volumes.as_ref())
    }

    /// Names of top-level networks.
    #[must_use]
    pub fn network_names(&self) -> Vec<String> {
        keys(self.networks.as_ref())
    }

    /// Returns `true` if `name` is declared under top-level `volumes`.
    #[must_use]
    pub fn declares_volume(&self, name: &str) -> bool {
        self.volumes
            .as_ref()
            .is_some_and(|v| v.contains_key(name))
    }
}

/// Renders a scalar YAML value as plain text; other values as inline YAML.
#[must_use]
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().replace('\n', ", "))
            .unwrap_or_default(),
    }
}

fn keys(map: Option<&Mapping>) -> Vec<String> {
    map.map(|m| m.keys().map(scalar_to_string).collect()).unwrap_or_default()
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn ordered_services<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, ServiceSpec)>, D::Error>
where
    D: Deserializer<'de>,
{
    let mapping = Option::<Mapping>::deserialize(deserializer)?.unwrap_or_default();
    mapping
        .into_iter()
        .map(|(key, value)| {
            let name = scalar_to_string(&key);
            let spec = if value.is_null() {
                ServiceSpec::default()
            } else {
                serde_yaml::from_value(value)
                    .map_err(|e| D::Error::custom(format!("service \"{name}\": {e}")))?
            };
            Ok((name, spec))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version: "3.8"
services:
  web:
    image: nginx:alpine
    ports:
      - "8080:80"
      - 9000
    environment:
      MODE: prod
      WORKERS: 4
    volumes:
      - ./site:/usr/share/nginx/html
  db:
    build: ./db
    environment:
      - POSTGRES_PASSWORD=secret
    volumes:
volumes:
  db_data:
networks:
  backend: {}
"#;

    #[test]
    fn parse_keeps_service_order_and_fields() {
        let file = ComposeFile::parse(SAMPLE).expect("parse");
        let names: Vec<&str> = file.services.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["web", "db"]);

        let web = file.service("web").expect("web");
        assert_eq!(web.image.as_deref(), Some("nginx:alpine"));
        assert_eq!(web.ports.len(), 2);
        assert_eq!(web.environment.entries(), vec!["MODE=prod", "WORKERS=4"]);

        let db = file.service("db").expect("db");
        assert!(db.image.is_none());
        assert!(db.build.is_some());
        assert!(db.volumes.is_empty());
        assert_eq!(db.environment.len(), 1);
    }

    #[test]
    fn parse_reads_top_level_declarations() {
        let file = ComposeFile::parse(SAMPLE).expect("parse");
        assert_eq!(file.version().as_deref(), Some("3.8"));
        assert_eq!(file.volume_names(), vec!["db_data"]);
        assert_eq!(file.network_names(), vec!["backend"]);
        assert!(file.declares_volume("db_data"));
        assert!(!file.declares_volume("cache"));
    }

    #[test]
    fn parse_numeric_version_is_rendered() {
        let file = ComposeFile::parse("version: 3.8\nservices: {}\n").expect("parse");
        assert_eq!(file.version().as_deref(), Some("3.8"));
    }

    #[test]
    fn parse_empty_document_is_empty() {
        let file = ComposeFile::parse("").expect("parse");
        assert!(file.services.is_empty());
        assert!(file.version().is_none());
    }

    #[test]
    fn parse_null_services_is_empty() {
        let file = ComposeFile::parse("version: '3.8'\nservices:\n  # none yet\n").expect("parse");
        assert!(file.services.is_empty());
    }

    #[test]
    fn parse_syntax_error_is_yaml_error() {
        let err = ComposeFile::parse("services: [unclosed").unwrap_err();
        assert!(matches!(err, EasyError::Yaml { .. }));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ComposeFile::load(&dir.path().join("docker-compose.yml")).unwrap_err();
        assert!(matches!(err, EasyError::Io { .. }));
    }
}
