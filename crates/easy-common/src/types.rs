//! Domain primitive types used across the easy-containers workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EasyError, Result};

/// Validated name of a service bundle.
///
/// Used both as a remote catalog key and as a local directory name, so it
/// can never contain path separators, traversal segments, or a leading dot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceName(String);

impl ServiceName {
    /// Parses and validates a service name.
    ///
    /// Surrounding whitespace is trimmed; case is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`EasyError::InvalidServiceName`] if the name is empty,
    /// is `.`/`..`, starts with a dot, or contains a path separator or a
    /// control character.
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name == "." || name == ".." {
            Some("name is a path traversal segment")
        } else if name.contains(['/', '\\']) {
            Some("name contains a path separator")
        } else if name.contains(char::is_control) {
            Some("name contains a control character")
        } else if name.starts_with('.') {
            Some("name starts with a dot")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(EasyError::InvalidServiceName {
                name: raw.to_string(),
                reason,
            }),
            None => Ok(Self(name.to_string())),
        }
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServiceName {
    type Error = EasyError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ServiceName> for String {
    fn from(name: ServiceName) -> Self {
        name.0
    }
}

impl std::str::FromStr for ServiceName {
    type Err = EasyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// One acquisition method in the fallback chain, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchStrategy {
    /// Sparse fetch of the service subtree from the catalog repository.
    SparseNetworkFetch,
    /// File-by-file download through the catalog API.
    RawFileFetch,
    /// Copy from a local clone of the catalog.
    LocalMirrorCopy,
    /// Built-in template generation.
    TemplateSynthesis,
}

impl FetchStrategy {
    /// Whether the strategy needs network access.
    #[must_use]
    pub const fn is_network(self) -> bool {
        matches!(self, Self::SparseNetworkFetch | Self::RawFileFetch)
    }
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SparseNetworkFetch => write!(f, "sparse-network-fetch"),
            Self::RawFileFetch => write!(f, "raw-file-fetch"),
            Self::LocalMirrorCopy => write!(f, "local-mirror-copy"),
            Self::TemplateSynthesis => write!(f, "template-synthesis"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_name_succeeds() {
        let name = ServiceName::parse("postgres").expect("valid");
        assert_eq!(name.as_str(), "postgres");
    }

    #[test]
    fn parse_trims_whitespace_and_keeps_case() {
        let name = ServiceName::parse("  Redis \n").expect("valid");
        assert_eq!(name.as_str(), "Redis");
    }

    #[test]
    fn parse_rejects_traversal_and_separators() {
        for bad in ["", "   ", ".", "..", "../etc", "a/b", "a\\b", ".hidden", "nul\0byte"] {
            let err = ServiceName::parse(bad).expect_err(bad);
            assert!(
                matches!(err, EasyError::InvalidServiceName { .. }),
                "{bad:?} gave {err}"
            );
        }
    }

    #[test]
    fn parse_rejects_inner_control_characters() {
        for bad in ["app\nservices:", "tab\there", "bell\u{7}", "cr\rname"] {
            let err = ServiceName::parse(bad).expect_err(bad);
            assert!(matches!(err, EasyError::InvalidServiceName { .. }), "{bad:?}");
        }
    }

    #[test]
    fn parse_allows_inner_dots_and_dashes() {
        assert!(ServiceName::parse("my-app.v2").is_ok());
        assert!(ServiceName::parse("elastic_search").is_ok());
    }

    #[test]
    fn deserialize_validates_names() {
        let ok: ServiceName = serde_json::from_str("\"kafka\"").expect("valid");
        assert_eq!(ok.to_string(), "kafka");
        assert!(serde_json::from_str::<ServiceName>("\"../x\"").is_err());
    }

    #[test]
    fn fetch_strategy_display_is_kebab_case() {
        assert_eq!(FetchStrategy::LocalMirrorCopy.to_string(), "local-mirror-copy");
        assert!(FetchStrategy::RawFileFetch.is_network());
        assert!(!FetchStrategy::TemplateSynthesis.is_network());
    }
}
