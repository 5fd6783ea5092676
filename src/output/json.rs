//! JSON output for duplicate scan results.
//!
//! The artifact is a single object mapping each duplicate digest to the
//! ordered list of paths that share it, pretty-printed with 4-space
//! indentation:
//!
//! ```json
//! {
//!     "0a4d55a8d778e5022fab701977c5d840bbc486d0": [
//!         "photos/2019/img_001.jpg",
//!         "backup/img_001.jpg"
//!     ]
//! }
//! ```
//!
//! Files are named `results_YYYYMMDD_HHMMSS.json` after the local time the
//! report is saved, so successive runs do not overwrite each other.
//!
//! # Example
//!
//! ```no_run
//! use dupfinder::duplicates::DuplicateFinder;
//! use dupfinder::output::json::JsonReport;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (report, _summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! let json = JsonReport::from_report(&report);
//! if let Some(path) = json.save_in(Path::new("."), chrono::Local::now()).unwrap() {
//!     println!("Saved {} duplicate hits to {}.", json.len(), path.display());
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::OutputError;
use crate::duplicates::DuplicateReport;

/// Prefix of every results file name.
pub const RESULTS_PREFIX: &str = "results_";

/// Serializable form of a [`DuplicateReport`].
///
/// Keys are lowercase hex digests, kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonReport {
    groups: BTreeMap<String, Vec<String>>,
}

impl JsonReport {
    /// Build the serializable form of a report.
    #[must_use]
    pub fn from_report(report: &DuplicateReport) -> Self {
        Self {
            groups: report
                .iter()
                .map(|group| {
                    let paths = group
                        .paths
                        .iter()
                        .map(|p| p.to_string_lossy().into_owned())
                        .collect();
                    (group.digest_hex(), paths)
                })
                .collect(),
        }
    }

    /// Number of duplicate groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if there are no duplicate groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Paths recorded for a hex digest.
    #[must_use]
    pub fn get(&self, digest_hex: &str) -> Option<&[String]> {
        self.groups.get(digest_hex).map(Vec::as_slice)
    }

    /// Iterate over `(digest, paths)` in ascending digest order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.groups
            .iter()
            .map(|(digest, paths)| (digest.as_str(), paths.as_slice()))
    }

    /// Serialize with 4-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, OutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| OutputError::Io(std::io::Error::other(e)))
    }

    /// Write the pretty-printed JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), OutputError> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer).map_err(|e| {
            if e.is_io() {
                OutputError::Io(e.into())
            } else {
                OutputError::Serialization(e)
            }
        })
    }

    /// Save into `dir` under a timestamped name.
    ///
    /// Nothing is written when the report is empty, in which case `Ok(None)`
    /// is returned. Otherwise returns the absolute path of the new file.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::WriteFailure`] if the file cannot be created
    /// or written.
    pub fn save_in<Tz: TimeZone>(
        &self,
        dir: &Path,
        now: DateTime<Tz>,
    ) -> Result<Option<PathBuf>, OutputError>
    where
        Tz::Offset: std::fmt::Display,
    {
        if self.is_empty() {
            log::debug!("No duplicate groups, not writing a results file");
            return Ok(None);
        }

        let path = dir.join(results_file_name(&now));
        self.save(&path)?;

        let absolute = std::path::absolute(&path).unwrap_or(path);
        log::debug!("Wrote {} groups to {}", self.len(), absolute.display());
        Ok(Some(absolute))
    }

    /// Write the report to an explicit path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::WriteFailure`] if the file cannot be created
    /// or written.
    pub fn save(&self, path: &Path) -> Result<(), OutputError> {
        let write_failure = |source| OutputError::WriteFailure {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_failure)?;
        let mut writer = BufWriter::new(file);
        match self.write_to(&mut writer) {
            Ok(()) => {}
            Err(OutputError::Io(source)) => return Err(write_failure(source)),
            Err(other) => return Err(other),
        }
        writer.flush().map_err(write_failure)
    }

    /// Read a previously saved report.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a report.
    pub fn load(path: &Path) -> Result<Self, OutputError> {
        let content = std::fs::read_to_string(path).map_err(|source| OutputError::ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// File name for a report saved at `now`: `results_YYYYMMDD_HHMMSS.json`.
#[must_use]
pub fn results_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}{}.json", RESULTS_PREFIX, now.format("%Y%m%d_%H%M%S"))
}
