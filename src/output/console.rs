//! Console listing of duplicate groups.
//!
//! Each group is printed as its digest followed by one line per member with
//! the file size in megabytes:
//!
//! ```text
//! Duplicated files found with sha 0a4d55a8d778e5022fab701977c5d840bbc486d0:
//!     1.5 MB 		photos/img_001.jpg
//!     1.5 MB 		backup/img_001.jpg
//! Found a total of 1 duplicates!
//! ```
//!
//! Sizes below 100 MB are followed by two tabs, larger ones by one, so the
//! paths line up for typical sizes.

use std::io::{self, Write};
use std::path::Path;

use crate::duplicates::DuplicateReport;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Console renderer for a [`DuplicateReport`].
#[derive(Debug, Clone, Copy)]
pub struct ConsoleOutput<'a> {
    report: &'a DuplicateReport,
}

impl<'a> ConsoleOutput<'a> {
    /// Create a renderer for a report.
    #[must_use]
    pub fn new(report: &'a DuplicateReport) -> Self {
        Self { report }
    }

    /// Write every group, then the total line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.write_groups(writer)?;
        writeln!(writer, "Found a total of {} duplicates!", self.report.len())
    }

    /// Write every group, without the total line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_groups<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for group in self.report.iter() {
            writeln!(writer, "Duplicated files found with sha {}:", group.digest)?;
            for path in group.paths {
                writeln!(writer, "{}", member_line(path, file_size(path)))?;
            }
        }
        Ok(())
    }
}

/// Size of a group member at render time.
///
/// A member that vanished or became unreadable since hashing is shown as 0.
fn file_size(path: &Path) -> u64 {
    match std::fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            log::warn!("Could not read size of {}: {}", path.display(), e);
            0
        }
    }
}

/// One member line: indent, size, separator tabs, path.
#[must_use]
pub fn member_line(path: &Path, bytes: u64) -> String {
    let megabytes = round_megabytes(bytes);
    let tabs = if megabytes < 100.0 { "\t\t" } else { "\t" };
    format!(
        "    {} MB {}{}",
        format_megabytes(megabytes),
        tabs,
        path.display()
    )
}

/// Bytes to megabytes, rounded to 3 decimals with ties to even.
#[must_use]
pub fn round_megabytes(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_MB * 1000.0).round_ties_even() / 1000.0
}

/// Shortest float form, always with a fractional part (`0.0`, `1.5`, `12.346`).
#[must_use]
pub fn format_megabytes(megabytes: f64) -> String {
    let text = megabytes.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}
