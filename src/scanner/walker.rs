//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a root
//! directory and collecting the paths of every regular file beneath it.
//!
//! # Features
//!
//! - Entries visited in file-name order, so results are deterministic
//! - Exclusion rules prune whole subtrees ([`ExcludeSet`])
//! - Unreadable directories are reported and skipped, never fatal
//! - Symlinked directories followed only when configured
//!
//! # Example
//!
//! ```no_run
//! use dupfinder::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{ExcludeSet, ScanError, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Compiled exclusion rules
    exclude: ExcludeSet,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        let exclude = ExcludeSet::new(&config.exclude);
        Self {
            root: path.to_path_buf(),
            config,
            exclude,
        }
    }

    /// Root directory of this walker.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the directory tree, yielding regular file paths.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration; the subtree that failed is simply not visited.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                let excluded = if entry.file_type().is_dir() {
                    self.exclude.is_excluded(entry.path())
                } else {
                    self.exclude.is_excluded_file(entry.path())
                };
                if excluded {
                    log::trace!("Excluding: {}", entry.path().display());
                }
                !excluded
            })
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.regular_file(entry).map(Ok),
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    /// Walk to completion, splitting file paths from recovered errors.
    #[must_use]
    pub fn collect_files(&self) -> (Vec<PathBuf>, Vec<ScanError>) {
        let mut files = Vec::new();
        let mut errors = Vec::new();

        for entry in self.walk() {
            match entry {
                Ok(path) => files.push(path),
                Err(e) => errors.push(e),
            }
        }

        (files, errors)
    }

    /// Keep regular files, including symlinks that resolve to one.
    fn regular_file(&self, entry: DirEntry) -> Option<PathBuf> {
        let file_type = entry.file_type();

        if file_type.is_file() {
            return Some(entry.into_path());
        }

        if file_type.is_symlink() {
            return match std::fs::metadata(entry.path()) {
                Ok(m) if m.is_file() => Some(entry.into_path()),
                Ok(_) => {
                    log::trace!("Skipping symlink to non-file: {}", entry.path().display());
                    None
                }
                Err(e) => {
                    log::debug!("Skipping dangling symlink {}: {}", entry.path().display(), e);
                    None
                }
            };
        }

        None
    }

    /// Convert a walkdir error into a recovered [`ScanError`].
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor() {
            let message = format!("filesystem loop back to {}", ancestor.display());
            log::warn!("Skipping {}: {}", path.display(), message);
            return ScanError::Io {
                path,
                source: std::io::Error::other(message),
            };
        }

        match error.into_io_error() {
            Some(source) => {
                log::warn!("Skipping unreadable directory {}: {}", path.display(), source);
                ScanError::UnreadableDirectory { path, source }
            }
            None => ScanError::Io {
                path,
                source: std::io::Error::other("directory walk failed"),
            },
        }
    }
}
