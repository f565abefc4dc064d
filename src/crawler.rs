//! Depth-first traversal of a metadata service.
//!
//! A directory is any `200 OK` response whose final URL ends in `/`. Its body
//! lists child names one per line; a child ending in `/` is itself a
//! directory. Everything else is a value and is stored as-is.

use std::collections::HashSet;

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::client::MetadataClient;
use crate::error::MirrorError;
use crate::mapping::Mapping;
use crate::path::{PathKey, RemotePath};

/// Deepest path, in segments, the crawler will request.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Walks a metadata tree one request at a time.
#[derive(Debug, Clone)]
pub struct Crawler {
    client: MetadataClient,
    max_depth: usize,
}

impl Crawler {
    pub fn new(client: MetadataClient) -> Self {
        Self {
            client,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Fetch `root` and everything reachable below it.
    ///
    /// Paths are visited in pre-order with children in listing order. The
    /// first transport error aborts the crawl and nothing collected so far
    /// is returned. Non-200 responses are stored like any other value.
    pub async fn crawl(&self, root: &RemotePath) -> Result<Mapping, MirrorError> {
        info!("Starting crawl of {}{}", self.client.base_url(), root);

        let mut mapping = Mapping::new();
        let mut visited = HashSet::new();
        let mut stack = vec![root.clone()];

        while let Some(path) = stack.pop() {
            if !visited.insert(path.to_string()) {
                warn!("Already fetched {}, skipping", path);
                continue;
            }

            info!("Processing {}", path);
            let fetched = self.client.fetch(&path).await?;
            let effective = fetched.path;

            if effective != path && !visited.insert(effective.to_string()) {
                warn!(
                    "{} resolved to already fetched {}, skipping",
                    path, effective
                );
                continue;
            }

            if fetched.status != StatusCode::OK {
                warn!(
                    "Received {} from {}. Saving anyway",
                    fetched.status.as_u16(),
                    effective
                );
            }

            if fetched.status != StatusCode::OK || !effective.is_dir() {
                store(&mut mapping, PathKey::leaf(&effective), fetched.body);
                continue;
            }

            let children = self.children(&effective, &fetched.body);
            store(&mut mapping, PathKey::index(&effective), fetched.body);

            // Reversed so the first listed child is popped next.
            stack.extend(children.into_iter().rev());
        }

        info!("Crawl finished with {} entries", mapping.len());
        Ok(mapping)
    }

    /// Child paths named by a directory listing, in listing order.
    fn children(&self, dir: &RemotePath, body: &[u8]) -> Vec<RemotePath> {
        let mut children = Vec::new();
        for name in String::from_utf8_lossy(body).lines() {
            if name.is_empty() {
                continue;
            }
            match dir.join(name) {
                Some(child) if child.depth() > self.max_depth => {
                    warn!(
                        "Not descending into {}: deeper than {} segments",
                        child, self.max_depth
                    );
                }
                Some(child) => children.push(child),
                None => warn!("Ignoring invalid entry {:?} in {}", name, dir),
            }
        }
        children
    }
}

fn store(mapping: &mut Mapping, key: PathKey, body: Vec<u8>) {
    debug!("Adding value for {}", key);
    if !mapping.insert(key.clone(), body) {
        warn!("Duplicate entry for {}, keeping the first", key);
    }
}
