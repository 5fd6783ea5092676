//! Path exclusion rules applied during directory traversal.
//!
//! A rule is one of:
//! - `Substring`: case-sensitive substring of a directory path
//! - `Glob`: glob pattern matched against the whole path (globset syntax)
//! - `Segment`: exact equality with one path component
//!
//! The default rule set is a single substring rule for the Windows recycle
//! bin ([`DEFAULT_EXCLUDE`]). A substring rule does not respect component
//! boundaries, so a directory merely containing the fragment is excluded too.
//! Substring rules only look at directories: a file is dropped by one only
//! because its parent directory was. Glob and segment rules apply to files
//! as well.
//!
//! # Example
//!
//! ```
//! use dupfinder::scanner::{ExcludeRule, ExcludeSet};
//! use std::path::Path;
//!
//! let rules: Vec<ExcludeRule> = vec![
//!     "segment:node_modules".parse().unwrap(),
//!     "glob:**/*.tmp".parse().unwrap(),
//! ];
//! let set = ExcludeSet::new(&rules);
//!
//! assert!(set.is_excluded(Path::new("/src/node_modules/lib.js")));
//! assert!(set.is_excluded(Path::new("/src/cache/a.tmp")));
//! assert!(!set.is_excluded(Path::new("/src/main.rs")));
//!
//! let cache = ExcludeSet::new(&["cache".parse().unwrap()]);
//! assert!(cache.is_excluded(Path::new("/src/mycache")));
//! assert!(!cache.is_excluded_file(Path::new("/src/mycache.txt")));
//! ```

use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

/// Path fragment of the Windows recycle bin, excluded by default.
pub const DEFAULT_EXCLUDE: &str = r":\$RECYCLE.BIN";

/// A single exclusion rule.
///
/// Serialized as `{ kind = "glob", pattern = "**/*.tmp" }` in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "pattern", rename_all = "lowercase")]
pub enum ExcludeRule {
    /// Case-sensitive substring of the full path.
    Substring(String),
    /// Glob matched against the full path.
    Glob(String),
    /// Exact match of any single path component.
    Segment(String),
}

impl ExcludeRule {
    /// The rule excluding the Windows recycle bin.
    #[must_use]
    pub fn default_rule() -> Self {
        Self::Substring(DEFAULT_EXCLUDE.to_string())
    }

    /// The pattern text, without its kind.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Substring(p) | Self::Glob(p) | Self::Segment(p) => p,
        }
    }
}

impl FromStr for ExcludeRule {
    type Err = String;

    /// Parse `kind:pattern`. A pattern without a known kind prefix is a
    /// substring rule.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule = if let Some(p) = s.strip_prefix("substring:") {
            Self::Substring(p.to_string())
        } else if let Some(p) = s.strip_prefix("glob:") {
            Self::Glob(p.to_string())
        } else if let Some(p) = s.strip_prefix("segment:") {
            Self::Segment(p.to_string())
        } else {
            Self::Substring(s.to_string())
        };

        if rule.pattern().is_empty() {
            return Err("Exclude pattern cannot be empty".to_string());
        }
        Ok(rule)
    }
}

impl fmt::Display for ExcludeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring(p) => write!(f, "substring:{p}"),
            Self::Glob(p) => write!(f, "glob:{p}"),
            Self::Segment(p) => write!(f, "segment:{p}"),
        }
    }
}

/// Compiled form of a list of [`ExcludeRule`]s.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    substrings: Vec<String>,
    /// Invalid globs, matched literally against every entry.
    literals: Vec<String>,
    segments: Vec<OsString>,
    globset: Option<GlobSet>,
}

impl ExcludeSet {
    /// Compile a rule list.
    ///
    /// Invalid globs are logged and then matched as literal text against
    /// every entry.
    #[must_use]
    pub fn new(rules: &[ExcludeRule]) -> Self {
        let mut substrings = Vec::new();
        let mut literals = Vec::new();
        let mut segments = Vec::new();
        let mut builder = GlobSetBuilder::new();
        let mut glob_count = 0usize;

        for rule in rules {
            match rule {
                ExcludeRule::Substring(p) => substrings.push(p.clone()),
                ExcludeRule::Segment(p) => segments.push(OsString::from(p)),
                ExcludeRule::Glob(p) => match Glob::new(p) {
                    Ok(glob) => {
                        builder.add(glob);
                        glob_count += 1;
                    }
                    Err(e) => {
                        log::warn!("Invalid exclude glob '{}': {}; matching it literally", p, e);
                        literals.push(p.clone());
                    }
                },
            }
        }

        let globset = if glob_count == 0 {
            None
        } else {
            match builder.build() {
                Ok(set) => Some(set),
                Err(e) => {
                    log::warn!("Failed to compile exclude globs: {}", e);
                    None
                }
            }
        };

        Self {
            substrings,
            literals,
            segments,
            globset,
        }
    }

    /// Check whether a directory path matches any rule.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        contains_any(path, &self.substrings) || self.is_excluded_file(path)
    }

    /// Check whether a file path matches a glob or segment rule.
    ///
    /// Substring rules are not consulted; they prune directories only.
    #[must_use]
    pub fn is_excluded_file(&self, path: &Path) -> bool {
        if contains_any(path, &self.literals) {
            return true;
        }

        if !self.segments.is_empty()
            && path
                .components()
                .any(|c| self.segments.iter().any(|s| c.as_os_str() == s.as_os_str()))
        {
            return true;
        }

        self.globset.as_ref().is_some_and(|g| g.is_match(path))
    }

    /// True if no rule is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.substrings.is_empty()
            && self.literals.is_empty()
            && self.segments.is_empty()
            && self.globset.is_none()
    }
}

fn contains_any(path: &Path, fragments: &[String]) -> bool {
    if fragments.is_empty() {
        return false;
    }
    let text = path.to_string_lossy();
    fragments.iter().any(|f| text.contains(f.as_str()))
}
