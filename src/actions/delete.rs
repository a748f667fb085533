//! Permanent single-file deletion.
//!
//! # Overview
//!
//! Files are removed with [`std::fs::remove_file`]. There is no trash and no
//! undo. A failed deletion is reported through [`DeleteError`] and never
//! aborts the caller's loop.
//!
//! # Example
//!
//! ```no_run
//! use dupe_remover::actions::delete::remove_record;
//! use dupe_remover::scanner::FileRecord;
//!
//! let record = FileRecord::new("report.txt", 10, "/b");
//! match remove_record(&record) {
//!     Ok(result) => println!("Deleted: {}", result.path.display()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scanner::FileRecord;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes, as recorded by the scan.
    pub size: u64,
}

/// Remove the file described by `record`.
///
/// The file is addressed relative to its recorded directory; the process
/// working directory is left untouched.
///
/// # Errors
///
/// - `NotFound` if the file no longer exists
/// - `PermissionDenied` if removal is not allowed
/// - `Io` for any other failure (e.g. the path is a directory)
pub fn remove_record(record: &FileRecord) -> Result<DeleteResult, DeleteError> {
    let path = record.directory.join(&record.name);

    fs::remove_file(&path).map_err(|e| {
        log::debug!("Error on deleting file '{}': {}", path.display(), e);
        DeleteError::from_io(&path, e)
    })?;

    log::info!("File deleted '{}' ({} bytes)", path.display(), record.size);

    Ok(DeleteResult {
        path,
        size: record.size,
    })
}
