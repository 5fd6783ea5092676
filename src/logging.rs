//! Diagnostic logging on stderr.
//!
//! dupfinder logs through the `log` facade with an `env_logger` backend.
//! Stdout carries only the duplicate listing, the "Saved ..." line and the
//! elapsed-time line, so logs never interleave with results a caller may
//! pipe elsewhere.
//!
//! `RUST_LOG` takes precedence when set. Otherwise the level follows the
//! flags: `--quiet` keeps errors only, no flag gives info, `-v` debug and
//! `-vv` trace. Scan diagnostics such as "Will look into the following
//! directory ..." are info records and unreadable files are warnings, so
//! `--quiet` hides both.
//!
//! ```rust,no_run
//! dupfinder::logging::init_logging(1, false);
//! log::debug!("visible with -v");
//! ```

use std::io::Write;

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the global logger. Later calls are ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet);
    let mut builder = Builder::from_env(Env::default().default_filter_or(level.as_str()));

    // Timestamps only help when debugging a local build.
    let with_timestamp = cfg!(debug_assertions);
    let with_module = verbose > 0;

    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        if with_timestamp {
            let timestamp = buf.timestamp_seconds();
            write!(buf, "{timestamp} ")?;
        }
        write!(buf, "{style}{:<5}{style:#} ", record.level())?;
        if with_module {
            write!(buf, "[{}] ", record.module_path().unwrap_or("?"))?;
        }
        writeln!(buf, "{}", record.args())
    });

    match builder.try_init() {
        Ok(()) => log::debug!("Logger ready, default level {}", level),
        Err(_) => log::trace!("Logger was already installed"),
    }
}

/// Level implied by the verbosity flags alone.
fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}
