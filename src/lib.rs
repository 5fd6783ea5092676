//! dupfinder - content-based duplicate file finder
//!
//! Walks one or more directory trees, hashes every regular file with SHA-1
//! and reports the groups of files whose content is identical, either as a
//! console listing or as a timestamped JSON file.
//!
//! # Library usage
//!
//! ```no_run
//! use dupfinder::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(8));
//! let (report, summary) = finder.find_duplicates(Path::new("/data")).unwrap();
//! for group in report.iter() {
//!     println!("{}: {} copies", group.digest, group.len());
//! }
//! println!("hashed {} files", summary.hashed_files);
//! ```

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;

use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, DuplicateReport, FinderConfig, ScanSummary};
use crate::error::ExitCode;
use crate::output::{ConsoleOutput, JsonReport};
use crate::progress::Progress;

/// Run the application for parsed command-line arguments.
///
/// Results go to stdout; see [`run_app_with_output`].
///
/// # Errors
///
/// See [`run_app_with_output`].
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_app_with_output(cli, &mut out)
}

/// Run the application, writing the listing and result lines to `out`.
///
/// Diagnostics and progress bars still go to stderr.
///
/// # Errors
///
/// Returns an error if the configuration file is missing or invalid, the
/// hashing pool cannot start, or the results cannot be written. Unreadable
/// files and directories are logged and skipped.
pub fn run_app_with_output<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    logging::init_logging(cli.verbose, cli.quiet);

    let config = load_config(&cli)?;
    let config = cli.merge_into(config);
    log::debug!("Effective configuration: {:?}", config);

    let progress = Arc::new(Progress::new(cli.quiet));
    let finder_config = FinderConfig::default()
        .with_io_threads(config.io_threads)
        .with_buffer_size(config.buffer_size)
        .with_walker_config(config.walker_config())
        .with_progress_callback(progress);
    let finder = DuplicateFinder::new(finder_config);

    let (report, summary) = finder
        .find_duplicates_in_paths(&cli.dirs)
        .context("Duplicate search failed")?;

    if cli.save_json {
        let dir = cli.output_dir.clone().unwrap_or_default();
        save_report(&report, &dir, out)?;
    } else {
        ConsoleOutput::new(&report)
            .write_to(out)
            .context("Failed to print results")?;
    }

    report_skipped(&summary);

    if !cli.quiet {
        writeln!(out, "It took {:.2?} to find duplicates..", start.elapsed())
            .context("Failed to print results")?;
    }
    out.flush().context("Failed to print results")?;

    Ok(ExitCode::Success)
}

/// Load the configuration named by `--config`, or the platform default.
///
/// An explicit file must exist; the platform default is optional.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    match cli.config.as_deref() {
        Some(path) => {
            anyhow::ensure!(
                path.is_file(),
                "Configuration file {} does not exist",
                path.display()
            );
            Config::load_from(Some(path))
                .with_context(|| format!("Failed to load configuration from {}", path.display()))
        }
        None => Ok(Config::load()),
    }
}

/// Save the report under `dir` and announce the file on `out`.
///
/// An empty `dir` means the working directory.
fn save_report<W: Write>(report: &DuplicateReport, dir: &Path, out: &mut W) -> anyhow::Result<()> {
    let json = JsonReport::from_report(report);

    match json
        .save_in(dir, chrono::Local::now())
        .context("Failed to save results")?
    {
        Some(path) => writeln!(
            out,
            "Saved {} duplicate hits to {}.",
            json.len(),
            path.display()
        )
        .context("Failed to print results")?,
        None => log::info!("No duplicates found, nothing saved"),
    }
    Ok(())
}

fn report_skipped(summary: &ScanSummary) {
    if summary.has_errors() {
        log::warn!(
            "Skipped {} unreadable directories and {} unreadable files",
            summary.scan_errors.len(),
            summary.hash_errors.len()
        );
    }
}
