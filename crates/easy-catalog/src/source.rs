//! Catalog source abstraction.

use easy_common::error::Result;
use easy_common::types::ServiceName;

/// Read-only view of the service catalog.
///
/// [`crate::CatalogClient`] implements this over HTTP; the acquisition
/// pipeline depends only on the trait so strategies can be tested offline.
pub trait CatalogSource: Send + Sync {
    /// Lists installable service names, sorted and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns `CatalogUnreachable` on transport failure or non-2xx status,
    /// `CatalogMalformed` if the response is not a listing.
    fn list_available(&self) -> Result<Vec<String>>;

    /// Lists the plain files of one service.
    ///
    /// # Errors
    ///
    /// Returns `ServiceNotInCatalog` when the remote reports the service
    /// as missing, otherwise as [`CatalogSource::list_available`].
    fn list_files(&self, name: &ServiceName) -> Result<Vec<String>>;

    /// Fetches the raw bytes of one file of a service.
    ///
    /// # Errors
    ///
    /// Returns `DownloadFailed` on transport failure or non-2xx status.
    fn fetch_file_content(&self, name: &ServiceName, filename: &str) -> Result<Vec<u8>>;
}
