//! Command-line interface definitions for dupe-remover.
//!
//! This module defines all CLI arguments using the clap derive API.
//! Values given here override the configuration file and environment
//! (see [`crate::config`]).
//!
//! # Example
//!
//! ```bash
//! # List duplicate candidates below a directory
//! dupe-remover --dir-path ~/Downloads
//!
//! # Review each group and delete chosen copies
//! dupe-remover --dir-path ~/Downloads --delete-duplicates
//!
//! # Verbose mode for debugging
//! dupe-remover -v --dir-path ~/Downloads
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Find files sharing a name and size and interactively remove the copies.
///
/// Files are matched by name and size only; content is not compared.
/// Without --delete-duplicates the groups are only listed.
#[derive(Debug, Parser)]
#[command(name = "dupe-remover")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Ask which duplicates to delete for every group found
    #[arg(long = "delete-duplicates", visible_alias = "delDuplicates")]
    pub delete_duplicates: bool,

    /// Only list duplicates, even if the config file enables deletion
    #[arg(long, overrides_with = "delete_duplicates")]
    pub no_delete_duplicates: bool,

    /// Directory to inspect (default: the filesystem root)
    #[arg(long = "dir-path", visible_alias = "dirPath", value_name = "PATH")]
    pub dir_path: Option<PathBuf>,

    /// Follow symbolic links during the scan
    ///
    /// Symlink cycles are detected and skipped.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Do not follow symbolic links, even if the config file enables it
    #[arg(long, overrides_with = "follow_symlinks")]
    pub no_follow_symlinks: bool,

    /// Configuration file to use instead of the platform default
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Deletion setting given on the command line, if any.
    #[must_use]
    pub fn delete_override(&self) -> Option<bool> {
        flag_pair(self.delete_duplicates, self.no_delete_duplicates)
    }

    /// Symlink setting given on the command line, if any.
    #[must_use]
    pub fn follow_symlinks_override(&self) -> Option<bool> {
        flag_pair(self.follow_symlinks, self.no_follow_symlinks)
    }
}

// overrides_with leaves at most one of the pair set
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
