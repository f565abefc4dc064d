//! In-memory result of a crawl.

use std::collections::btree_map::{BTreeMap, Entry};

use crate::path::PathKey;

/// Raw response bodies keyed by where they will be written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: BTreeMap<PathKey, Vec<u8>>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body unless the key is already taken.
    ///
    /// Returns `false` and leaves the existing body in place on collision.
    pub fn insert(&mut self, key: PathKey, body: Vec<u8>) -> bool {
        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(body);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, key: &PathKey) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathKey, &[u8])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Entries ordered for writing: most segments first, then key order.
    pub fn deepest_first(&self) -> Vec<(&PathKey, &[u8])> {
        let mut entries: Vec<_> = self.iter().collect();
        // Stable sort keeps key order within a depth.
        entries.sort_by(|(a, _), (b, _)| b.depth().cmp(&a.depth()));
        entries
    }
}

impl FromIterator<(PathKey, Vec<u8>)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (PathKey, Vec<u8>)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, body) in iter {
            mapping.insert(key, body);
        }
        mapping
    }
}
