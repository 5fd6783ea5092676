//! Output formatters for duplicate scan results.
//!
//! This module provides the two report renderings:
//! - [`console`]: human-readable listing with file sizes
//! - [`json`]: timestamped JSON file for scripting
//!
//! # Example
//!
//! ```no_run
//! use dupfinder::duplicates::DuplicateFinder;
//! use dupfinder::output::ConsoleOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (report, _summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! ConsoleOutput::new(&report)
//!     .write_to(&mut std::io::stdout().lock())
//!     .unwrap();
//! ```

pub mod console;
pub mod json;

use std::path::PathBuf;

// Re-export main types
pub use console::ConsoleOutput;
pub use json::JsonReport;

/// Errors that can occur while emitting a report.
#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    /// The results file could not be created or written.
    #[error("Failed to write results to {path}: {source}")]
    WriteFailure {
        /// Destination file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A saved results file could not be read.
    #[error("Failed to read results from {path}: {source}")]
    ReadFailure {
        /// Source file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization or parsing error
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while writing to a stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
