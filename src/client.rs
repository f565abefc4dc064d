//! HTTP client wrapper for metadata requests.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode, Url};

use crate::error::MirrorError;
use crate::path::RemotePath;

/// Default timeout for metadata requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default metadata service base URL (link-local address).
pub const DEFAULT_BASE_URL: &str = "http://169.254.169.254";

/// HTTP client wrapper for metadata service requests.
///
/// Headers passed at construction are sent with every request, including
/// requests issued while following redirects.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    inner: Client,
    base_url: String,
    max_size: Option<usize>,
}

/// A response, read in full.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: StatusCode,
    /// Path of the final URL after redirects.
    pub path: RemotePath,
    pub body: Vec<u8>,
}

impl MetadataClient {
    /// Create a new metadata client with the specified timeout, base URL and headers.
    ///
    /// The base URL must be an `http` or `https` scheme and authority with no
    /// path, since response paths are taken as absolute service paths.
    pub fn new(
        timeout: Duration,
        base_url: &str,
        headers: HeaderMap,
    ) -> Result<Self, MirrorError> {
        validate_base_url(base_url)?;
        let inner = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .danger_accept_invalid_certs(false)
            .build()?;
        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_size: None,
        })
    }

    /// Create a new metadata client with the default timeout and base URL.
    pub fn with_default_timeout(headers: HeaderMap) -> Result<Self, MirrorError> {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_BASE_URL, headers)
    }

    /// Create a new metadata client with a custom base URL (for testing).
    pub fn with_base_url(base_url: &str, headers: HeaderMap) -> Result<Self, MirrorError> {
        Self::new(DEFAULT_TIMEOUT, base_url, headers)
    }

    /// Reject response bodies larger than `max_size` bytes.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` relative to the base URL and read the whole body.
    ///
    /// Any status code is returned as data. Only transport failures and
    /// oversized bodies are errors.
    pub async fn fetch(&self, path: &RemotePath) -> Result<Fetched, MirrorError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.inner.get(&url).send().await.map_err(transport_error)?;

        let status = response.status();
        let path = RemotePath::parse(response.url().path());
        let body = read_body_limited(response, self.max_size).await?;

        Ok(Fetched { status, path, body })
    }
}

fn validate_base_url(base_url: &str) -> Result<(), MirrorError> {
    let invalid = || MirrorError::InvalidBaseUrl(base_url.to_string());
    let url = Url::parse(base_url).map_err(|_| invalid())?;
    let bare = url.path() == "/" && url.query().is_none() && url.fragment().is_none();
    if !matches!(url.scheme(), "http" | "https") || !bare {
        return Err(invalid());
    }
    Ok(())
}

fn transport_error(err: reqwest::Error) -> MirrorError {
    if err.is_timeout() {
        MirrorError::Timeout
    } else {
        MirrorError::Request(err)
    }
}

/// Read response body with an optional size limit.
///
/// If `max_size` is `Some`, this will:
/// 1. Check the `Content-Length` header and fail early if it exceeds the limit
/// 2. Read the body chunk by chunk, aborting as soon as the limit is exceeded
pub async fn read_body_limited(
    response: Response,
    max_size: Option<usize>,
) -> Result<Vec<u8>, MirrorError> {
    let Some(max_size) = max_size else {
        return Ok(response.bytes().await.map_err(transport_error)?.to_vec());
    };

    if let Some(content_length) = response.content_length() {
        if content_length as usize > max_size {
            return Err(MirrorError::TooLarge(content_length as usize, max_size));
        }
    }

    let capacity = response
        .content_length()
        .map(|cl| (cl as usize).min(max_size))
        .unwrap_or(max_size.min(8192));
    let mut body = Vec::with_capacity(capacity);

    let mut stream = response;
    while let Some(chunk) = stream.chunk().await.map_err(transport_error)? {
        let total = body.len().saturating_add(chunk.len());
        if total > max_size {
            return Err(MirrorError::TooLarge(total, max_size));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
