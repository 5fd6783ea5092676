//! Duplicate finder pipeline.
//!
//! # Overview
//!
//! [`DuplicateFinder`] runs three phases in order:
//! 1. **Scanning**: walk every root to completion, pooling file paths
//! 2. **Hashing**: compute a SHA-1 digest for each pooled path and record it
//!    in a [`DuplicateIndex`]
//! 3. **Reporting**: keep only the digests shared by two or more paths
//!
//! Unreadable directories and files are logged, counted in the
//! [`ScanSummary`] and skipped; they never abort the run.
//!
//! # Example
//!
//! ```no_run
//! use dupfinder::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::PathBuf;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(8));
//! let (report, summary) = finder
//!     .find_duplicates_in_paths(&[PathBuf::from("/media/photos")])
//!     .unwrap();
//!
//! for group in report.iter() {
//!     println!("{}: {} copies", group.digest, group.len());
//! }
//! println!("{} files hashed in {:?}", summary.hashed_files, summary.scan_duration);
//! ```

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::{DuplicateIndex, DuplicateReport};
use crate::progress::ProgressCallback;
use crate::scanner::{HashError, HashedFile, Hasher, ScanError, Walker, WalkerConfig};

/// Pipeline phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Enumerating all roots into one path pool
    Scanning,
    /// Hashing the pool and filling the index
    Hashing,
    /// Filtering the index down to duplicate groups
    Reporting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Scanning => write!(f, "scanning"),
            Phase::Hashing => write!(f, "hashing"),
            Phase::Reporting => write!(f, "reporting"),
        }
    }
}

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Number of worker threads for hashing.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Read window for the hasher, in bytes.
    pub buffer_size: usize,
    /// Directory walker settings (exclusions, symlinks).
    pub walker_config: WalkerConfig,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinderConfig")
            .field("io_threads", &self.io_threads)
            .field("buffer_size", &self.buffer_size)
            .field("walker_config", &self.walker_config)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: 4,
            buffer_size: crate::scanner::MIN_BUFFER_SIZE,
            walker_config: WalkerConfig::default(),
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the number of hashing threads (at least 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the hasher read window.
    #[must_use]
    pub fn with_buffer_size(mut self, bytes: usize) -> Self {
        self.buffer_size = bytes;
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn notify_start(&self, phase: Phase, total: usize) {
        if let Some(ref callback) = self.progress_callback {
            callback.on_phase_start(phase, total);
        }
    }

    fn notify_end(&self, phase: Phase) {
        if let Some(ref callback) = self.progress_callback {
            callback.on_phase_end(phase);
        }
    }
}

/// Summary statistics from a complete run.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of roots scanned
    pub roots: usize,
    /// Files found by the scanner (overlapping roots count twice)
    pub total_files: usize,
    /// Files successfully hashed
    pub hashed_files: usize,
    /// Files that could not be read
    pub failed_files: usize,
    /// Bytes read while hashing
    pub bytes_hashed: u64,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies across all groups (members beyond the first)
    pub duplicate_files: usize,
    /// Duration of the scanning phase
    pub walk_duration: Duration,
    /// Duration of the hashing phase
    pub hash_duration: Duration,
    /// Duration of the whole run
    pub scan_duration: Duration,
    /// Directories that could not be read
    pub scan_errors: Vec<ScanError>,
    /// Files that could not be hashed
    pub hash_errors: Vec<HashError>,
}

impl ScanSummary {
    /// True if any directory or file was skipped because of an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.scan_errors.is_empty() || !self.hash_errors.is_empty()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// No root directory was given.
    #[error("No directories to scan")]
    NoRoots,

    /// The hashing worker pool could not be created.
    #[error("Failed to start hashing threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Duplicate finder that orchestrates the scan, hash and report phases.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::with_buffer_size(config.buffer_size);
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find duplicates under a single root.
    ///
    /// # Errors
    ///
    /// See [`DuplicateFinder::find_duplicates_in_paths`].
    pub fn find_duplicates(
        &self,
        path: &std::path::Path,
    ) -> Result<(DuplicateReport, ScanSummary), FinderError> {
        self.find_duplicates_in_paths(&[path.to_path_buf()])
    }

    /// Find duplicates across several roots.
    ///
    /// Roots are scanned independently and their files pooled; overlapping
    /// roots are not merged, so files under the overlap are hashed twice.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if no roots are given or the hashing pool
    /// cannot be built. Unreadable files and directories are not errors.
    pub fn find_duplicates_in_paths(
        &self,
        roots: &[PathBuf],
    ) -> Result<(DuplicateReport, ScanSummary), FinderError> {
        if roots.is_empty() {
            return Err(FinderError::NoRoots);
        }

        let start_time = Instant::now();
        let mut summary = ScanSummary {
            roots: roots.len(),
            ..Default::default()
        };

        // Scanning
        let walk_start = Instant::now();
        let files = self.scan_roots(roots, &mut summary);
        summary.walk_duration = walk_start.elapsed();

        // Hashing
        let hash_start = Instant::now();
        let index = self.hash_files(files, &mut summary)?;
        summary.hash_duration = hash_start.elapsed();

        // Reporting
        self.config.notify_start(Phase::Reporting, index.len());
        let report = index.into_report();
        summary.duplicate_groups = report.len();
        summary.duplicate_files = report.duplicate_files();
        summary.scan_duration = start_time.elapsed();
        self.config.notify_end(Phase::Reporting);

        log::info!(
            "Found {} duplicate groups ({} redundant files) in {:.2?}",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.scan_duration
        );

        Ok((report, summary))
    }

    /// Hash an already collected list of paths.
    ///
    /// # Errors
    ///
    /// Returns `FinderError::ThreadPool` if the hashing pool cannot be built.
    pub fn find_duplicates_from_files(
        &self,
        files: Vec<PathBuf>,
    ) -> Result<(DuplicateReport, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let mut summary = ScanSummary {
            total_files: files.len(),
            ..Default::default()
        };

        let index = self.hash_files(files, &mut summary)?;
        summary.hash_duration = start_time.elapsed();

        let report = index.into_report();
        summary.duplicate_groups = report.len();
        summary.duplicate_files = report.duplicate_files();
        summary.scan_duration = start_time.elapsed();

        Ok((report, summary))
    }

    /// Walk every root to completion and pool the file paths.
    fn scan_roots(&self, roots: &[PathBuf], summary: &mut ScanSummary) -> Vec<PathBuf> {
        self.config.notify_start(Phase::Scanning, 0);

        let mut pool = Vec::new();
        for root in roots {
            log::info!("Will look into the following directory {}", root.display());

            let walker = Walker::new(root, self.config.walker_config.clone());
            let before = pool.len();
            for entry in walker.walk() {
                match entry {
                    Ok(path) => {
                        pool.push(path);
                        if let Some(ref callback) = self.config.progress_callback {
                            callback.on_progress(pool.len(), root.to_string_lossy().as_ref());
                        }
                    }
                    Err(e) => summary.scan_errors.push(e),
                }
            }

            log::info!(
                "Found a total of {} files in {}",
                pool.len() - before,
                root.display()
            );
        }

        self.config.notify_end(Phase::Scanning);
        summary.total_files = pool.len();
        log::info!("Found a total of {} files", pool.len());

        pool
    }

    /// Hash the pooled files in parallel and record the results in order.
    fn hash_files(
        &self,
        files: Vec<PathBuf>,
        summary: &mut ScanSummary,
    ) -> Result<DuplicateIndex, FinderError> {
        let mut index = DuplicateIndex::new();
        if files.is_empty() {
            log::debug!("Hashing: No files to process");
            return Ok(index);
        }

        let total = files.len();
        self.config.notify_start(Phase::Hashing, total);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads.max(1))
            .build()?;

        let done = AtomicUsize::new(0);
        let results: Vec<(PathBuf, Result<HashedFile, HashError>)> = pool.install(|| {
            files
                .into_par_iter()
                .map(|path| {
                    let result = self.hasher.hash_file(&path);
                    let current = done.fetch_add(1, Ordering::Relaxed) + 1;
                    log::trace!("{}/{} : Checking {}", current, total, path.display());
                    if let Some(ref callback) = self.config.progress_callback {
                        callback.on_progress(current, path.to_string_lossy().as_ref());
                    }
                    (path, result)
                })
                .collect()
        });

        // Results keep pool order, so group members stay in discovery order.
        for (path, result) in results {
            match result {
                Ok(hashed) => {
                    summary.hashed_files += 1;
                    summary.bytes_hashed += hashed.size;
                    index.record(path, hashed.digest);
                }
                Err(e) => {
                    log::warn!("Skipping {}", e);
                    summary.failed_files += 1;
                    summary.hash_errors.push(e);
                }
            }
        }

        self.config.notify_end(Phase::Hashing);
        log::debug!(
            "Hashing complete: {} hashed, {} failed, {} bytes",
            summary.hashed_files,
            summary.failed_files,
            summary.bytes_hashed
        );

        Ok(index)
    }
}
