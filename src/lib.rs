//! Recursively download a cloud instance metadata service into a directory tree.
//!
//! The metadata services on AWS and GCP expose a virtual filesystem over HTTP:
//! a path ending in `/` returns a newline-separated listing of its children,
//! anything else returns a value. This crate walks that tree depth-first and
//! writes it out as real files, so an instance's metadata can be inspected
//! offline.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use metadata_mirror::{materialize, MetadataMirror, MirrorError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), MirrorError> {
//!     let mirror = MetadataMirror::aws()?;
//!
//!     // Crawl and write in one go
//!     mirror.mirror(Path::new("./snapshot")).await?;
//!
//!     // Or inspect the crawl result first
//!     let mapping = mirror.crawl().await?;
//!     for (key, body) in mapping.iter() {
//!         println!("{} ({} bytes)", key, body.len());
//!     }
//!     materialize(&mapping, Path::new("./snapshot"))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Layout on disk
//!
//! | Remote path | Response | Written to |
//! |-------------|----------|------------|
//! | `/latest/meta-data/hostname` | value | `<out>/latest/meta-data/hostname` |
//! | `/latest/meta-data/` | listing | `<out>/latest/meta-data/index.html` |
//! | `/latest/missing/` | 404 | `<out>/latest/missing` |

mod client;
mod crawler;
mod error;
mod mapping;
mod materialize;
mod mirror;
mod path;
mod provider;

pub use client::{Fetched, MetadataClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use crawler::{Crawler, DEFAULT_MAX_DEPTH};
pub use error::MirrorError;
pub use mapping::Mapping;
pub use materialize::{materialize, Summary};
pub use mirror::MetadataMirror;
pub use path::{PathKey, RemotePath, INDEX_FILE};
pub use provider::CloudProvider;
