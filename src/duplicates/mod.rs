//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Digest-to-path grouping ([`groups`])
//! - The scan, hash and report pipeline ([`finder`])

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, Phase, ScanSummary};
pub use groups::{DuplicateGroup, DuplicateIndex, DuplicateReport};
