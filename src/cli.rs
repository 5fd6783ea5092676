//! Command-line interface definitions for dupfinder.
//!
//! # Example
//!
//! ```bash
//! # List duplicates under two directories
//! dupfinder --dir ~/Pictures --dir /mnt/backup/Pictures
//!
//! # Several roots after one flag, saved to results_YYYYMMDD_HHMMSS.json
//! dupfinder --dir ~/Music /mnt/old-laptop/Music --save-json
//!
//! # Skip version-control and build directories, no progress output
//! dupfinder --dir ~/src -e segment:.git -e segment:target --quiet
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::scanner::ExcludeRule;

/// Finds duplicated files in the given directories.
///
/// Files are compared by the SHA-1 digest of their content; names and
/// timestamps are ignored.
#[derive(Debug, Parser)]
#[command(name = "dupfinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory or directories to look into
    #[arg(long = "dir", value_name = "DIR", required = true, num_args = 1..)]
    pub dirs: Vec<PathBuf>,

    /// Save found duplicates to a JSON file (results_<date>.json) instead of listing them
    #[arg(long)]
    pub save_json: bool,

    /// Directory the JSON file is written to (default: current directory)
    #[arg(long, value_name = "DIR", requires = "save_json")]
    pub output_dir: Option<PathBuf>,

    /// Print no progress or diagnostic information, only the results
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Exclude paths matching a rule (can be specified multiple times)
    ///
    /// Rules are `substring:TEXT`, `glob:PATTERN` or `segment:NAME`;
    /// a rule without a prefix is a substring.
    #[arg(short, long = "exclude", value_name = "RULE")]
    pub exclude: Vec<ExcludeRule>,

    /// Do not apply the configured exclusion rules (the recycle bin rule by default)
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Descend into symbolically linked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Number of threads hashing files in parallel (default: 4)
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Read buffer size for hashing, at least 64KiB (e.g., 64KiB, 1MiB)
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub buffer_size: Option<u64>,

    /// Configuration file to use instead of the platform default
    #[arg(long, value_name = "PATH", env = "DUPFINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

impl Cli {
    /// Apply command-line overrides to a loaded configuration.
    #[must_use]
    pub fn merge_into(&self, mut config: Config) -> Config {
        if self.no_default_excludes {
            config.exclude.clear();
        }
        config.exclude.extend(self.exclude.iter().cloned());

        if let Some(threads) = self.io_threads {
            config.io_threads = threads;
        }
        if let Some(size) = self.buffer_size {
            config.buffer_size = usize::try_from(size).unwrap_or(usize::MAX);
        }
        config.follow_symlinks |= self.follow_symlinks;
        config
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dupfinder::cli::parse_size;
///
/// assert_eq!(parse_size("65536").unwrap(), 65536);
/// assert_eq!(parse_size("64KiB").unwrap(), 65536);
/// assert_eq!(parse_size("1MB").unwrap(), 1_000_000);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}
