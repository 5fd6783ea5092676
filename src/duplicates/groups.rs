//! Digest-to-path grouping.
//!
//! # Overview
//!
//! [`DuplicateIndex`] accumulates `digest -> [path, ...]` mappings while
//! files are hashed. Once hashing is complete it is queried for the
//! entries with two or more paths: the duplicate groups.
//!
//! Groups come out in ascending digest order, and the paths within a group
//! keep the order they were recorded in, so output is reproducible for an
//! unchanged tree.
//!
//! # Example
//!
//! ```
//! use dupfinder::duplicates::DuplicateIndex;
//! use dupfinder::scanner::Hasher;
//! use std::path::PathBuf;
//!
//! let mut index = DuplicateIndex::new();
//! let a = Hasher::hash_bytes(b"A");
//! let b = Hasher::hash_bytes(b"B");
//!
//! index.record(PathBuf::from("/one/a.txt"), a);
//! index.record(PathBuf::from("/two/a.txt"), a);
//! index.record(PathBuf::from("/one/b.txt"), b);
//!
//! let groups: Vec<_> = index.duplicate_groups().collect();
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].len(), 2);
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::scanner::Digest;

/// Accumulated digest-to-paths mapping for one run.
///
/// Every key maps to a non-empty path list. There is no removal.
#[derive(Debug, Clone, Default)]
pub struct DuplicateIndex {
    entries: BTreeMap<Digest, Vec<PathBuf>>,
    file_count: usize,
}

impl DuplicateIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` to the list for `digest`, creating the list if needed.
    pub fn record(&mut self, path: PathBuf, digest: Digest) {
        self.entries.entry(digest).or_default().push(path);
        self.file_count += 1;
    }

    /// Number of distinct digests recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of paths recorded.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Paths recorded for a digest.
    #[must_use]
    pub fn paths(&self, digest: &Digest) -> Option<&[PathBuf]> {
        self.entries.get(digest).map(Vec::as_slice)
    }

    /// Entries with two or more paths, in ascending digest order.
    pub fn duplicate_groups(&self) -> impl Iterator<Item = DuplicateGroup<'_>> + '_ {
        self.entries
            .iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(digest, paths)| DuplicateGroup {
                digest: *digest,
                paths,
            })
    }

    /// Consume the index, keeping only the duplicate groups.
    #[must_use]
    pub fn into_report(self) -> DuplicateReport {
        DuplicateReport {
            groups: self
                .entries
                .into_iter()
                .filter(|(_, paths)| paths.len() > 1)
                .collect(),
        }
    }
}

/// Borrowed view of one duplicate group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateGroup<'a> {
    /// Digest shared by every member
    pub digest: Digest,
    /// Members in recording order
    pub paths: &'a [PathBuf],
}

impl DuplicateGroup<'_> {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty (never true for a reported group).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of redundant copies (all members minus one).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Digest as lowercase hexadecimal.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        self.digest.to_hex()
    }
}

/// The duplicate groups of a finished run.
///
/// Iteration is in ascending digest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    groups: BTreeMap<Digest, Vec<PathBuf>>,
}

impl DuplicateReport {
    /// Number of duplicate groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if no duplicates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over the groups in ascending digest order.
    pub fn iter(&self) -> impl Iterator<Item = DuplicateGroup<'_>> + '_ {
        self.groups.iter().map(|(digest, paths)| DuplicateGroup {
            digest: *digest,
            paths,
        })
    }

    /// Members of the group for `digest`.
    #[must_use]
    pub fn get(&self, digest: &Digest) -> Option<&[PathBuf]> {
        self.groups.get(digest).map(Vec::as_slice)
    }

    /// Total number of redundant copies across all groups.
    #[must_use]
    pub fn duplicate_files(&self) -> usize {
        self.iter().map(|g| g.duplicate_count()).sum()
    }

    /// Check whether a path belongs to any group.
    #[must_use]
    pub fn contains_path(&self, path: &Path) -> bool {
        self.groups.values().any(|paths| paths.iter().any(|p| p == path))
    }
}

impl FromIterator<(Digest, Vec<PathBuf>)> for DuplicateReport {
    /// Build a report directly; entries with fewer than two paths are dropped.
    fn from_iter<I: IntoIterator<Item = (Digest, Vec<PathBuf>)>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().filter(|(_, paths)| paths.len() > 1).collect(),
        }
    }
}
