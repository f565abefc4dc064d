//! Remote paths and the keys they are stored under.

use std::fmt;
use std::path::{Path, PathBuf};

/// File name a directory listing's own body is stored under.
pub const INDEX_FILE: &str = "index.html";

/// An absolute path on the metadata service.
///
/// Directories are advertised with a trailing slash, so the flag is kept
/// alongside the segments. The root is always a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemotePath {
    segments: Vec<String>,
    dir: bool,
}

impl RemotePath {
    /// The service root, `/`.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
            dir: true,
        }
    }

    /// Normalize a URL path as reported by the server.
    ///
    /// Empty and `.` segments are dropped and `..` pops its parent, so
    /// `/a//b/./c/../` becomes `/a/b/`.
    pub fn parse(path: &str) -> Self {
        let mut segments: Vec<String> = Vec::new();
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s.to_string()),
            }
        }
        let dir = segments.is_empty() || path.ends_with('/');
        Self { segments, dir }
    }

    /// Append a child name taken from a directory listing.
    ///
    /// A trailing slash on `child` marks it as a directory. Returns `None`
    /// if this path is not a directory or the name contains empty, `.` or
    /// `..` segments.
    pub fn join(&self, child: &str) -> Option<Self> {
        if !self.dir {
            return None;
        }
        let (name, dir) = match child.strip_suffix('/') {
            Some(name) => (name, true),
            None => (child, false),
        };
        let mut segments = self.segments.clone();
        for segment in name.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return None;
            }
            segments.push(segment.to_string());
        }
        Some(Self { segments, dir })
    }

    /// Whether the path ends in a slash.
    pub fn is_dir(&self) -> bool {
        self.dir
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))?;
        if self.dir && !self.segments.is_empty() {
            write!(f, "/")?;
        }
        Ok(())
    }
}

/// Key of a mapping entry: a file path relative to the output root.
///
/// Leaf keys hold a value's own path; index keys hold a directory's path
/// followed by [`INDEX_FILE`]. Keys order lexicographically by segment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathKey {
    segments: Vec<String>,
}

impl PathKey {
    /// Key for a value stored at `path`, ignoring any trailing slash.
    ///
    /// The root has no name of its own, so it maps to its index key.
    pub fn leaf(path: &RemotePath) -> Self {
        if path.segments.is_empty() {
            return Self::index(path);
        }
        Self {
            segments: path.segments.clone(),
        }
    }

    /// Key for the listing body of the directory `dir`.
    pub fn index(dir: &RemotePath) -> Self {
        let mut segments = dir.segments.clone();
        segments.push(INDEX_FILE.to_string());
        Self { segments }
    }

    /// Parse a rendered key such as `/latest/meta-data/hostname`.
    ///
    /// Returns `None` for the bare root, which names no file.
    pub fn parse(key: &str) -> Option<Self> {
        let path = RemotePath::parse(key);
        if path.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: path.segments,
        })
    }

    /// Number of `/` separators in the rendered key.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Location of this entry beneath `root`.
    pub fn to_fs_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(&self.segments);
        path
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}
