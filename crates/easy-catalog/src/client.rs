//! HTTP catalog client.
//!
//! Speaks a GitHub-style contents API: `GET <api_base>/contents/<root>`
//! returns a JSON array of `{name, type}` objects, and the raw host serves
//! `<raw_base>/<root>/<service>/<file>`.

use std::time::Duration;

use easy_common::config::CatalogConfig;
use easy_common::error::{EasyError, Result};
use easy_common::types::ServiceName;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::entry::{self, CatalogEntry};
use crate::source::CatalogSource;

const GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// Blocking HTTP client for the remote catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Builds a client from the catalog configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EasyError::Config`] if the HTTP client cannot be built.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EasyError::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { http, config })
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// URL of the services listing.
    #[must_use]
    pub fn listing_url(&self) -> String {
        format!(
            "{}/contents/{}?ref={}",
            self.config.api_base.trim_end_matches('/'),
            self.config.services_root,
            self.config.branch
        )
    }

    /// URL of one service's file listing.
    #[must_use]
    pub fn service_url(&self, name: &ServiceName) -> String {
        format!(
            "{}/contents/{}/{name}?ref={}",
            self.config.api_base.trim_end_matches('/'),
            self.config.services_root,
            self.config.branch
        )
    }

    /// URL of one file's raw content.
    #[must_use]
    pub fn raw_url(&self, name: &ServiceName, filename: &str) -> String {
        format!(
            "{}/{}/{name}/{filename}",
            self.config.raw_base.trim_end_matches('/'),
            self.config.services_root
        )
    }

    /// Fetches the unfiltered services listing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogUnreachable` or `CatalogMalformed`.
    pub fn list_entries(&self) -> Result<Vec<CatalogEntry>> {
        let url = self.listing_url();
        let response = self.get(&url)?;
        if !response.status().is_success() {
            return Err(EasyError::CatalogUnreachable {
                message: format!("HTTP {}", response.status()),
                url,
            });
        }
        parse_listing(&url, response)
    }

    fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!(url, "catalog request");
        self.http
            .get(url)
            .send()
            .map_err(|e| EasyError::CatalogUnreachable {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}

impl CatalogSource for CatalogClient {
    fn list_available(&self) -> Result<Vec<String>> {
        let entries = self.list_entries()?;
        let names = entry::service_names(&entries, &self.config.hidden_prefix);
        tracing::info!(count = names.len(), "fetched catalog listing");
        Ok(names)
    }

    fn list_files(&self, name: &ServiceName) -> Result<Vec<String>> {
        let url = self.service_url(name);
        let response = self.get(&url)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(EasyError::ServiceNotInCatalog {
                service: name.to_string(),
            });
        }
        if !status.is_success() {
            return Err(EasyError::CatalogUnreachable {
                url,
                message: format!("HTTP {status}"),
            });
        }
        let entries = parse_listing(&url, response)?;
        Ok(entry::file_names(&entries))
    }

    fn fetch_file_content(&self, name: &ServiceName, filename: &str) -> Result<Vec<u8>> {
        let url = self.raw_url(name, filename);
        tracing::debug!(url = %url, "downloading file");
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| EasyError::DownloadFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(EasyError::DownloadFailed {
                message: format!("HTTP {}", response.status()),
                url,
            });
        }
        let bytes = response.bytes().map_err(|e| EasyError::DownloadFailed {
            url: url.clone(),
            message: format!("failed to read body: {e}"),
        })?;
        Ok(bytes.to_vec())
    }
}

fn parse_listing(url: &str, response: Response) -> Result<Vec<CatalogEntry>> {
    let value: serde_json::Value = response.json().map_err(|e| EasyError::CatalogMalformed {
        url: url.to_string(),
        message: format!("invalid JSON: {e}"),
    })?;
    if !value.is_array() {
        return Err(EasyError::CatalogMalformed {
            url: url.to_string(),
            message: "expected a JSON array of entries".into(),
        });
    }
    serde_json::from_value(value).map_err(|e| EasyError::CatalogMalformed {
        url: url.to_string(),
        message: format!("unexpected entry shape: {e}"),
    })
}
