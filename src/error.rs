//! Error types for mirroring operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a crawl or a materialization run.
///
/// Non-200 responses and file/directory conflicts on disk are not errors;
/// they are logged and the run continues.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Request timed out.
    #[error("request timeout")]
    Timeout,

    /// HTTP request error.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Base URL is not a bare scheme and authority.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// Response exceeds maximum allowed size.
    #[error("response too large: {0} bytes exceeds limit of {1} bytes")]
    TooLarge(usize, usize),

    /// Filesystem error while writing the tree.
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MirrorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MirrorError::Io {
            path: path.into(),
            source,
        }
    }
}
