//! Physical file identity for walks that follow symlinks.
//!
//! With symlinks followed, one file can be reached through several paths
//! (a link to a sibling directory, a link to the file itself). Recording
//! each path separately would group a file with itself, and deleting the
//! "copy" would remove the only one. [`SeenFiles`] remembers which physical
//! files were already recorded so later paths to them are skipped.
//!
//! # Platform Support
//!
//! - **Unix**: (device id, inode) pairs from the file metadata
//! - **Other**: the canonicalized path

use std::collections::HashSet;
use std::fs::Metadata;
use std::path::Path;
#[cfg(not(unix))]
use std::path::PathBuf;

/// Identity of the file behind a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum FileId {
    #[cfg(unix)]
    Inode { dev: u64, ino: u64 },
    #[cfg(not(unix))]
    Canonical(PathBuf),
}

impl FileId {
    #[cfg(unix)]
    fn of(_path: &Path, metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self::Inode {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    fn of(path: &Path, _metadata: &Metadata) -> Option<Self> {
        std::fs::canonicalize(path).ok().map(Self::Canonical)
    }
}

/// Set of physical files already recorded during one walk.
#[derive(Debug, Default)]
pub struct SeenFiles {
    seen: HashSet<FileId>,
}

impl SeenFiles {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the file at `path` and report whether this is its first path.
    ///
    /// `metadata` must describe the link target, not the link. A file whose
    /// identity cannot be determined is always treated as new.
    pub fn first_visit(&mut self, path: &Path, metadata: &Metadata) -> bool {
        match FileId::of(path, metadata) {
            Some(id) => self.seen.insert(id),
            None => true,
        }
    }
}
