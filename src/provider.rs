//! Cloud provider enumeration.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Required header for GCP metadata requests.
const METADATA_FLAVOR_HEADER: &str = "metadata-flavor";

/// Required header value for GCP metadata requests.
const METADATA_FLAVOR_VALUE: &str = "Google";

/// Supported cloud providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloudProvider {
    /// Amazon Web Services
    Aws,
    /// Google Cloud Platform
    Gcp,
}

impl CloudProvider {
    /// Headers every request to this provider's metadata service must carry.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let CloudProvider::Gcp = self {
            headers.insert(
                HeaderName::from_static(METADATA_FLAVOR_HEADER),
                HeaderValue::from_static(METADATA_FLAVOR_VALUE),
            );
        }
        headers
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudProvider::Aws => write!(f, "AWS"),
            CloudProvider::Gcp => write!(f, "GCP"),
        }
    }
}
