//! Scanner module for directory traversal.
//!
//! This module provides functionality for:
//! - Recursive, ordered directory walking using walkdir
//! - Building the in-memory [`FileRecord`] collection
//! - Fatal error reporting through [`ScanError`]
//!
//! # Example
//!
//! ```no_run
//! use dupe_remover::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! match walker.scan() {
//!     Ok(records) => println!("Found {} files", records.len()),
//!     Err(e) => eprintln!("Scan failed: {}", e),
//! }
//! ```

pub mod identity;
pub mod walker;

use std::path::{Path, PathBuf};

pub use walker::Walker;

/// One file discovered during a scan.
///
/// Two records are treated as duplicates of each other when their
/// [`key`](FileRecord::key) is equal. File content is never compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Base file name
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Directory containing the file
    pub directory: PathBuf,
    /// Set once this record has been absorbed as a match of a duplicate group
    pub checked: bool,
}

impl FileRecord {
    /// Create a new, unchecked record.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            directory: directory.into(),
            checked: false,
        }
    }

    /// Full path of the file (`directory/name`).
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.name)
    }

    /// The (name, size) pair duplicates are matched on.
    #[must_use]
    pub fn key(&self) -> DuplicateKey<'_> {
        DuplicateKey {
            name: &self.name,
            size: self.size,
        }
    }

    /// Whether `other` shares this record's name and size.
    #[must_use]
    pub fn is_duplicate_of(&self, other: &FileRecord) -> bool {
        self.key() == other.key()
    }
}

/// Composite key used to match duplicate candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateKey<'a> {
    /// Base file name
    pub name: &'a str,
    /// File size in bytes
    pub size: u64,
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    /// Cycles are detected and skipped, and a file reachable through several
    /// paths is recorded once. When disabled, links are ignored.
    pub follow_symlinks: bool,
}

impl WalkerConfig {
    /// Create a new walker configuration.
    #[must_use]
    pub fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }
}

/// Errors that abort a directory scan.
///
/// Every variant is fatal: the scan stops at the first one and no partial
/// record collection is returned.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The scan root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while listing a directory or reading metadata.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The scan was interrupted by the user.
    #[error("Scan interrupted")]
    Interrupted,
}

impl ScanError {
    /// Classify an I/O error for `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Get the path associated with this error (if any).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::NotADirectory(p)
            | Self::Io { path: p, .. } => Some(p),
            Self::Interrupted => None,
        }
    }
}
