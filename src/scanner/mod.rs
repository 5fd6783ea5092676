//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Sorted, recursive directory walking using walkdir
//! - Path exclusion rules (substring, glob, path segment)
//! - Streaming SHA-1 content hashing
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`exclude`]: Exclusion rules applied while walking
//! - [`hasher`]: SHA-1 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupfinder::scanner::{Hasher, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! let (files, errors) = walker.collect_files();
//!
//! let hasher = Hasher::new();
//! for path in &files {
//!     match hasher.hash_file(path) {
//!         Ok(hashed) => println!("{} {}", hashed.digest, path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! println!("{} directories could not be read", errors.len());
//! ```

pub mod exclude;
pub mod hasher;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use exclude::{ExcludeRule, ExcludeSet, DEFAULT_EXCLUDE};
pub use hasher::{Digest, HashedFile, Hasher, DIGEST_LEN, MIN_BUFFER_SIZE};
pub use walker::Walker;

/// Configuration for directory walking.
///
/// Controls exclusion and symlink handling.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Follow symbolic links to directories during traversal.
    /// Warning: May revisit trees reachable through several links.
    pub follow_symlinks: bool,

    /// Rules deciding which paths are pruned from the walk.
    pub exclude: Vec<ExcludeRule>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            exclude: vec![ExcludeRule::default_rule()],
        }
    }
}

impl WalkerConfig {
    /// Create a new configuration.
    ///
    /// # Arguments
    ///
    /// * `follow_symlinks` - Whether to descend into symlinked directories
    /// * `exclude` - Exclusion rules applied to every visited path
    #[must_use]
    pub fn new(follow_symlinks: bool, exclude: Vec<ExcludeRule>) -> Self {
        Self {
            follow_symlinks,
            exclude,
        }
    }
}

/// Errors that can occur during directory scanning.
///
/// All of these are recovered by the walker: the affected subtree is
/// skipped and the walk continues.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// A directory (or the root itself) could not be read.
    #[error("Unreadable directory {path}: {source}")]
    UnreadableDirectory {
        /// Directory that could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A directory entry could not be inspected.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::UnreadableDirectory { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file could not be opened, or a read failed mid-stream.
    #[error("Unreadable file {path}: {source}")]
    UnreadableFile {
        /// File that could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::UnreadableFile { path, .. } => path,
        }
    }
}
