//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting a [`FileRecord`] for every regular file in it.
//!
//! # Features
//!
//! - Depth-first traversal: a subdirectory is fully visited before its
//!   later siblings, entries of one directory in file-name order
//! - Symlinks skipped by default, or followed with cycle detection; a
//!   followed walk records each physical file once
//! - Fail-fast: the first unreadable directory or file aborts the scan
//! - Graceful shutdown via atomic flag
//!
//! # Example
//!
//! ```no_run
//! use dupe_remover::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path().display(), file.size),
//!         Err(e) => {
//!             eprintln!("Error: {}", e);
//!             break;
//!         }
//!     }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use super::identity::SeenFiles;
use super::{FileRecord, ScanError, WalkerConfig};

/// Recursive directory walker producing [`FileRecord`]s.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set to `true`, the walk yields
    /// [`ScanError::Interrupted`] and stops.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Scan the whole tree.
    ///
    /// Returns every regular file below the root, or the first error hit.
    /// Nothing collected before a failure is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the root is not a readable directory, if any
    /// directory cannot be listed, if any file's metadata cannot be read, or
    /// if shutdown was requested.
    pub fn scan(&self) -> Result<Vec<FileRecord>, ScanError> {
        check_root(&self.root)?;

        let records = self.walk().collect::<Result<Vec<_>, _>>()?;

        log::debug!("Scanned {}: {} files", self.root.display(), records.len());
        Ok(records)
    }

    /// Walk the directory tree, yielding file records.
    ///
    /// Errors are yielded in place; callers that need the fail-fast
    /// contract should stop at the first `Err` (as [`Walker::scan`] does).
    pub fn walk(&self) -> impl Iterator<Item = Result<FileRecord, ScanError>> + '_ {
        let walk_dir = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();
        let mut seen = SeenFiles::new();

        walk_dir.into_iter().filter_map(move |entry_result| {
            if self.is_shutdown_requested() {
                log::debug!("Walker: Shutdown requested, stopping iteration");
                return Some(Err(ScanError::Interrupted));
            }

            match entry_result {
                Ok(entry) => self.process_entry(&entry, &mut seen),
                Err(e) => self.handle_walk_error(e),
            }
        })
    }

    fn process_entry(
        &self,
        entry: &DirEntry,
        seen: &mut SeenFiles,
    ) -> Option<Result<FileRecord, ScanError>> {
        // The root itself is not a file of the tree
        if entry.depth() == 0 {
            return None;
        }

        let file_type = entry.file_type();
        if file_type.is_dir() {
            log::trace!("Entering directory: {}", entry.path().display());
            return None;
        }

        // Without follow_links, walkdir reports the link itself
        if file_type.is_symlink() {
            log::trace!("Skipping symlink: {}", entry.path().display());
            return None;
        }

        if !file_type.is_file() {
            log::trace!("Skipping special file: {}", entry.path().display());
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                let path = entry.path().to_path_buf();
                log::debug!("Error on reading file '{}': {}", path.display(), e);
                return Some(Err(walk_error_to_scan_error(path, e)));
            }
        };

        // A followed link can lead back to a file already recorded
        if self.config.follow_symlinks && !seen.first_visit(entry.path(), &metadata) {
            log::debug!(
                "Skipping '{}': same file already recorded",
                entry.path().display()
            );
            return None;
        }

        let directory = entry
            .path()
            .parent()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        Some(Ok(FileRecord::new(
            entry.file_name().to_string_lossy(),
            metadata.len(),
            directory,
        )))
    }

    fn handle_walk_error(&self, error: walkdir::Error) -> Option<Result<FileRecord, ScanError>> {
        if let Some(ancestor) = error.loop_ancestor() {
            log::warn!(
                "Skipping symlink loop at {} (points back to {})",
                error.path().unwrap_or(self.root.as_path()).display(),
                ancestor.display()
            );
            return None;
        }

        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::debug!("Can't read directory '{}': {}", path.display(), error);
        Some(Err(walk_error_to_scan_error(path, error)))
    }
}

fn check_root(root: &Path) -> Result<(), ScanError> {
    let metadata = fs::metadata(root).map_err(|e| {
        log::debug!("Can't read directory '{}': {}", root.display(), e);
        ScanError::from_io(root, e)
    })?;

    if metadata.is_dir() {
        Ok(())
    } else {
        log::debug!("Scan root is not a directory: {}", root.display());
        Err(ScanError::NotADirectory(root.to_path_buf()))
    }
}

fn walk_error_to_scan_error(path: PathBuf, error: walkdir::Error) -> ScanError {
    match error.into_io_error() {
        Some(io) => ScanError::from_io(&path, io),
        None => ScanError::Io {
            source: std::io::Error::other("directory walk failed"),
            path,
        },
    }
}
