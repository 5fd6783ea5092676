//! SHA-1 file hasher with streaming support.
//!
//! # Overview
//!
//! The [`Hasher`] reads a file in fixed-size chunks (64 KiB by default,
//! never less) and feeds each chunk into an incremental SHA-1 state, so
//! memory use is bounded regardless of file size.
//!
//! SHA-1 is used for speed, not for collision resistance: two files are
//! treated as duplicates when their digests match.
//!
//! # Example
//!
//! ```no_run
//! use dupfinder::scanner::Hasher;
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let hashed = hasher.hash_file(Path::new("Cargo.toml")).unwrap();
//! println!("{} ({} bytes)", hashed.digest, hashed.size);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;

use sha1::{Digest as _, Sha1};

use super::HashError;

/// Digest length in bytes (160 bits).
pub const DIGEST_LEN: usize = 20;

/// Smallest read window the hasher will use (64 KiB).
pub const MIN_BUFFER_SIZE: usize = 64 * 1024;

/// Content digest of one file.
///
/// Ordering compares raw bytes, which is the same as comparing the
/// lowercase hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wrap raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hexadecimal form (40 characters).
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// Parse a 40-character hexadecimal string (either case).
    ///
    /// Returns `None` if the string has the wrong length or a non-hex digit.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != DIGEST_LEN * 2 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let mut bytes = [0u8; DIGEST_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Self(bytes))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Digest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| format!("Invalid SHA-1 hex digest: '{s}'"))
    }
}

/// Result of hashing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashedFile {
    /// Content digest
    pub digest: Digest,
    /// Number of bytes read
    pub size: u64,
}

/// Streaming file hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    buffer_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with the default 64 KiB read window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: MIN_BUFFER_SIZE,
        }
    }

    /// Create a hasher with a custom read window.
    ///
    /// Sizes below [`MIN_BUFFER_SIZE`] are raised to it.
    #[must_use]
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(MIN_BUFFER_SIZE),
        }
    }

    /// Read window in bytes.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Hash the full content of a file.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::UnreadableFile`] if the file cannot be opened or
    /// a read fails before end of file.
    pub fn hash_file(&self, path: &Path) -> Result<HashedFile, HashError> {
        let unreadable = |source| HashError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unreadable)?;
        self.hash_reader(file).map_err(unreadable)
    }

    /// Hash everything a reader yields until end of stream.
    ///
    /// # Errors
    ///
    /// Propagates any read error other than `Interrupted`.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> std::io::Result<HashedFile> {
        let mut state = Sha1::new();
        let mut buffer = vec![0u8; self.buffer_size];
        let mut size = 0u64;

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            state.update(&buffer[..n]);
            size += n as u64;
        }

        Ok(HashedFile {
            digest: Digest(state.finalize().into()),
            size,
        })
    }

    /// Hash an in-memory byte slice.
    #[must_use]
    pub fn hash_bytes(data: &[u8]) -> Digest {
        Digest(Sha1::digest(data).into())
    }
}
