//! Application configuration management.
//!
//! Settings are layered with figment, later layers overriding earlier ones:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. `config.toml` in the platform config directory
//!    (e.g. `~/.config/dupfinder/config.toml` on Linux)
//! 3. Environment variables prefixed with `DUPFINDER_`
//!    (e.g. `DUPFINDER_IO_THREADS=8`)
//!
//! Command-line flags are applied on top by the caller.
//!
//! ```toml
//! io_threads = 8
//! buffer_size = 1048576
//!
//! [[exclude]]
//! kind = "segment"
//! pattern = "node_modules"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::scanner::{ExcludeRule, WalkerConfig, MIN_BUFFER_SIZE};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DUPFINDER_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of threads hashing files in parallel.
    pub io_threads: usize,
    /// Hasher read window in bytes (raised to 64 KiB if smaller).
    pub buffer_size: usize,
    /// Descend into symlinked directories.
    pub follow_symlinks: bool,
    /// Exclusion rules. Replaces the default recycle-bin rule when set.
    pub exclude: Vec<ExcludeRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            io_threads: 4,
            buffer_size: MIN_BUFFER_SIZE,
            follow_symlinks: false,
            exclude: vec![ExcludeRule::default_rule()],
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// Falls back to defaults if the file is malformed.
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::load_from(path.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load the configuration layered over an explicit file.
    ///
    /// A missing file is not an error; its layer is simply empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an environment variable holds a
    /// value of the wrong type.
    pub fn load_from(path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    /// The layered configuration sources.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            log::debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dupfinder").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Walker settings derived from this configuration.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::new(self.follow_symlinks, self.exclude.clone())
    }
}
