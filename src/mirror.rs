//! MetadataMirror struct and core implementation.

use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::client::{MetadataClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::crawler::{Crawler, DEFAULT_MAX_DEPTH};
use crate::error::MirrorError;
use crate::mapping::Mapping;
use crate::materialize::{materialize, Summary};
use crate::path::RemotePath;
use crate::provider::CloudProvider;

/// Main interface for snapshotting a provider's metadata service.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use metadata_mirror::{MetadataMirror, MirrorError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), MirrorError> {
///     let mirror = MetadataMirror::gcp()?;
///     mirror.mirror(Path::new("./metadata")).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MetadataMirror {
    provider: CloudProvider,
    client: MetadataClient,
    max_depth: usize,
}

impl MetadataMirror {
    /// Create a mirror for `provider` against an arbitrary base URL.
    pub fn for_provider(
        provider: CloudProvider,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, MirrorError> {
        Ok(Self {
            provider,
            client: MetadataClient::new(timeout, base_url, provider.headers())?,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Create a MetadataMirror instance for AWS.
    pub fn aws() -> Result<Self, MirrorError> {
        Self::aws_with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a MetadataMirror instance for AWS with a custom base URL.
    pub fn aws_with_base_url(base_url: &str) -> Result<Self, MirrorError> {
        Self::for_provider(CloudProvider::Aws, base_url, DEFAULT_TIMEOUT)
    }

    /// Create a MetadataMirror instance for GCP.
    pub fn gcp() -> Result<Self, MirrorError> {
        Self::gcp_with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a MetadataMirror instance for GCP with a custom base URL.
    pub fn gcp_with_base_url(base_url: &str) -> Result<Self, MirrorError> {
        Self::for_provider(CloudProvider::Gcp, base_url, DEFAULT_TIMEOUT)
    }

    /// Set the maximum size limit for each fetched response.
    ///
    /// A larger response aborts the crawl with `MirrorError::TooLarge`.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.client = self.client.with_max_size(max_size);
        self
    }

    /// Limit how many path segments deep the crawl descends.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Get the configured cloud provider.
    pub fn provider(&self) -> CloudProvider {
        self.provider
    }

    /// Crawl the whole service starting at `/`.
    ///
    /// # Errors
    ///
    /// Returns the first transport error encountered; no partial mapping.
    pub async fn crawl(&self) -> Result<Mapping, MirrorError> {
        Crawler::new(self.client.clone())
            .with_max_depth(self.max_depth)
            .crawl(&RemotePath::root())
            .await
    }

    /// Crawl the service, then write the result beneath `output`.
    ///
    /// Nothing is written unless the crawl completes.
    pub async fn mirror(&self, output: &Path) -> Result<Summary, MirrorError> {
        info!("Mirroring {} metadata into {}", self.provider, output.display());
        let mapping = self.crawl().await?;
        materialize(&mapping, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_constructor() {
        let mirror = MetadataMirror::aws().unwrap();
        assert_eq!(mirror.provider(), CloudProvider::Aws);
        assert_eq!(mirror.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_gcp_constructor() {
        let mirror = MetadataMirror::gcp().unwrap();
        assert_eq!(mirror.provider(), CloudProvider::Gcp);
    }

    #[test]
    fn test_with_base_url() {
        let mirror = MetadataMirror::gcp_with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(mirror.client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_base_url_with_path_rejected() {
        let result = MetadataMirror::aws_with_base_url("http://localhost:8080/latest");
        assert!(matches!(result, Err(MirrorError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_with_max_depth() {
        let mirror = MetadataMirror::aws().unwrap().with_max_depth(4);
        assert_eq!(mirror.max_depth, 4);
    }
}
