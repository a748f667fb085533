//! Per-run state: settings, the scanned records and the review loop.
//!
//! A [`ScanContext`] is built once per run from the resolved [`Config`].
//! It owns the record collection for the whole run; the scan fills it,
//! the grouper marks it and the prompt reads the groups it yields.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytesize::ByteSize;

use crate::actions::{DeletionPrompt, GroupOutcome, Prompt, PromptError};
use crate::config::Config;
use crate::duplicates::Grouper;
use crate::scanner::{FileRecord, ScanError, Walker, WalkerConfig};

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files found by the scan.
    pub files_scanned: usize,
    /// Duplicate groups reported.
    pub groups_found: usize,
    /// Groups abandoned because of invalid input.
    pub groups_aborted: usize,
    /// Files removed.
    pub files_deleted: usize,
    /// Removals that failed.
    pub deletions_failed: usize,
    /// Bytes freed by removals.
    pub bytes_freed: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: &GroupOutcome) {
        self.groups_found += 1;
        if matches!(outcome, GroupOutcome::Aborted { .. }) {
            self.groups_aborted += 1;
        }
        if let Some(report) = outcome.report() {
            self.files_deleted += report.deleted.len();
            self.deletions_failed += report.failed.len();
            self.bytes_freed += report.bytes_freed();
        }
    }

    /// Human-readable summary of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Scanned {} files, found {} duplicate groups ({} abandoned on invalid input). \
             Deleted {} file(s), {} failed, freed {}",
            self.files_scanned,
            self.groups_found,
            self.groups_aborted,
            self.files_deleted,
            self.deletions_failed,
            ByteSize::b(self.bytes_freed)
        )
    }
}

/// Settings and record collection of a single run.
#[derive(Debug)]
pub struct ScanContext {
    root: PathBuf,
    delete_enabled: bool,
    walker_config: WalkerConfig,
    shutdown_flag: Option<Arc<AtomicBool>>,
    records: Vec<FileRecord>,
}

impl ScanContext {
    /// Create a context for `root` with deletion enabled or not.
    #[must_use]
    pub fn new(root: &Path, delete_enabled: bool, walker_config: WalkerConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            delete_enabled,
            walker_config,
            shutdown_flag: None,
            records: Vec::new(),
        }
    }

    /// Create a context from resolved settings.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.dir_path,
            config.delete_duplicates,
            WalkerConfig::new(config.follow_symlinks),
        )
    }

    /// Set the shutdown flag shared with the walker and the prompt.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Scan root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether groups are offered for deletion.
    #[must_use]
    pub fn delete_enabled(&self) -> bool {
        self.delete_enabled
    }

    /// Records collected by the last successful scan.
    #[must_use]
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Scan the root and store the records. Returns the number of files.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScanError`] hit; the stored records are left
    /// empty in that case.
    pub fn scan(&mut self) -> Result<usize, ScanError> {
        let mut walker = Walker::new(&self.root, self.walker_config.clone());
        if let Some(flag) = &self.shutdown_flag {
            walker = walker.with_shutdown_flag(Arc::clone(flag));
        }

        self.records.clear();
        self.records = walker.scan()?;
        log::info!(
            "Found {} files under {}",
            self.records.len(),
            self.root.display()
        );
        Ok(self.records.len())
    }

    /// Group the stored records and review each group with `prompt`.
    ///
    /// Group *i* is fully reviewed before group *i+1* is computed.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] if the console fails or the run is
    /// interrupted.
    pub fn review_all<P: Prompt>(
        &mut self,
        prompt: &mut DeletionPrompt<P>,
    ) -> Result<RunSummary, PromptError> {
        let mut summary = RunSummary {
            files_scanned: self.records.len(),
            ..RunSummary::default()
        };

        for group in Grouper::new(&mut self.records) {
            if self
                .shutdown_flag
                .as_ref()
                .is_some_and(|f| f.load(Ordering::SeqCst))
            {
                return Err(PromptError::Interrupted);
            }

            let outcome = prompt.review(&group)?;
            summary.record(&outcome);
        }

        log::info!("{}", summary.summary());
        Ok(summary)
    }
}
