//! Interactive review of duplicate groups.
//!
//! # Overview
//!
//! [`DeletionPrompt`] drives one duplicate group at a time through
//!
//! ```text
//! Listing -> (deletion disabled: Done)
//!         -> PromptCount -> PromptIndex (x count) -> {Deleted | Aborted} -> Done
//! ```
//!
//! Console access goes through the [`Prompt`] trait so the protocol can be
//! scripted in tests. [`ConsolePrompt`] implements it over any
//! `BufRead`/`Write` pair.
//!
//! Invalid input never ends the run: it abandons the rest of the current
//! group, logs a warning and hands control back to the caller.
//!
//! # Example
//!
//! ```
//! use dupe_remover::actions::prompt::{ConsolePrompt, DeletionPrompt, GroupOutcome};
//! use dupe_remover::duplicates::DuplicateGroup;
//! use dupe_remover::scanner::FileRecord;
//! use std::io::Cursor;
//!
//! let group = DuplicateGroup::new(
//!     FileRecord::new("a.txt", 1, "/x"),
//!     vec![FileRecord::new("a.txt", 1, "/y")],
//! );
//! let console = ConsolePrompt::new(Cursor::new(&b""[..]), Vec::new());
//! let mut prompt = DeletionPrompt::new(console, false);
//!
//! let outcome = prompt.review(&group).unwrap();
//! assert!(matches!(outcome, GroupOutcome::Listed));
//! ```

use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytesize::ByteSize;
use thiserror::Error;
use yansi::Paint;

use super::delete::{remove_record, DeleteError, DeleteResult};
use crate::duplicates::DuplicateGroup;

const COUNT_QUESTION: &str = "Enter count of files to delete. Enter 0 to save all files.";
const INDEX_QUESTION: &str = "Enter number of file to delete. Enter 0 to save all files.";

/// Invalid answer to a prompt.
#[derive(Debug, Error)]
pub enum InputError {
    /// The line did not contain an integer.
    #[error("not a number: {0:?}")]
    NotANumber(String),

    /// The integer was outside the accepted range.
    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    /// Input reached end of file.
    #[error("input closed")]
    Closed,

    /// Reading the input failed.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Errors that end the review of all remaining groups.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Writing to the console failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    /// The user interrupted the run.
    #[error("interrupted")]
    Interrupted,
}

/// Line-oriented console used by [`DeletionPrompt`].
pub trait Prompt {
    /// Print one line.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Block until one line is entered and parse it as an integer.
    fn read_integer(&mut self) -> Result<i64, InputError>;
}

/// [`Prompt`] over a reader and a writer.
#[derive(Debug)]
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    /// Create a prompt reading answers from `input` and printing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompt and return the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl ConsolePrompt<StdinLock<'static>, Stdout> {
    /// Prompt bound to the process stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for ConsolePrompt<R, W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")?;
        self.output.flush()
    }

    fn read_integer(&mut self) -> Result<i64, InputError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        let answer = line.trim();
        answer
            .parse()
            .map_err(|_| InputError::NotANumber(answer.to_string()))
    }
}

/// Deletions attempted for one group.
#[derive(Debug, Default)]
pub struct DeletionReport {
    /// Files removed.
    pub deleted: Vec<DeleteResult>,
    /// Removals that failed.
    pub failed: Vec<DeleteError>,
}

impl DeletionReport {
    /// Bytes freed by the successful deletions.
    #[must_use]
    pub fn bytes_freed(&self) -> u64 {
        self.deleted.iter().map(|d| d.size).sum()
    }

    /// Paths removed, in the order they were deleted.
    #[must_use]
    pub fn deleted_paths(&self) -> Vec<PathBuf> {
        self.deleted.iter().map(|d| d.path.clone()).collect()
    }
}

/// How the review of one group ended.
#[derive(Debug)]
pub enum GroupOutcome {
    /// Deletion is disabled; the group was only listed.
    Listed,
    /// The user asked to delete zero files.
    KeptAll,
    /// Every requested deletion was attempted.
    Finished(DeletionReport),
    /// The user entered 0 at a file number prompt.
    Stopped(DeletionReport),
    /// Invalid input abandoned the remaining deletions.
    Aborted {
        /// What was wrong with the input
        error: InputError,
        /// Deletions performed before the invalid input
        report: DeletionReport,
    },
}

impl GroupOutcome {
    /// Deletion report, if the group reached the deletion loop.
    #[must_use]
    pub fn report(&self) -> Option<&DeletionReport> {
        match self {
            Self::Listed | Self::KeptAll => None,
            Self::Finished(report) | Self::Stopped(report) | Self::Aborted { report, .. } => {
                Some(report)
            }
        }
    }

    /// Number of files removed.
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.report().map_or(0, |r| r.deleted.len())
    }
}

/// Per-group listing and deletion state machine.
#[derive(Debug)]
pub struct DeletionPrompt<P> {
    prompt: P,
    delete_enabled: bool,
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl<P: Prompt> DeletionPrompt<P> {
    /// Create a new deletion prompt. With `delete_enabled` false groups are
    /// only listed.
    pub fn new(prompt: P, delete_enabled: bool) -> Self {
        Self {
            prompt,
            delete_enabled,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag checked after every answer.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Consume and return the underlying prompt.
    pub fn into_prompt(self) -> P {
        self.prompt
    }

    fn check_shutdown(&self) -> Result<(), PromptError> {
        if self
            .shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
        {
            log::debug!("Prompt: Shutdown requested");
            return Err(PromptError::Interrupted);
        }
        Ok(())
    }

    /// List `group` and, if deletion is enabled, ask which copies to remove.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Output`] if the console cannot be written and
    /// [`PromptError::Interrupted`] if shutdown was requested. Invalid
    /// answers and failed deletions are reported in the [`GroupOutcome`].
    pub fn review(&mut self, group: &DuplicateGroup) -> Result<GroupOutcome, PromptError> {
        self.print_listing(group)?;

        if !self.delete_enabled {
            return Ok(GroupOutcome::Listed);
        }

        let match_count = group.match_count();
        let count = if match_count > 1 {
            self.prompt.write_line(COUNT_QUESTION)?;
            let answer = self.prompt.read_integer();
            self.check_shutdown()?;

            match answer.and_then(|value| in_range(value, 0, match_count as i64)) {
                Ok(count) => count,
                Err(error) => {
                    self.prompt
                        .write_line(&"Wrong count. Files not deleted".yellow().to_string())?;
                    log::warn!(
                        "Wrong count entered for '{}' files. Files not deleted: {}",
                        group.name(),
                        error
                    );
                    return Ok(GroupOutcome::Aborted {
                        error,
                        report: DeletionReport::default(),
                    });
                }
            }
        } else {
            1
        };

        if count == 0 {
            self.prompt.write_line("All files kept.")?;
            log::debug!("Keeping all copies of '{}'", group.name());
            return Ok(GroupOutcome::KeptAll);
        }

        let mut report = DeletionReport::default();
        for _ in 0..count {
            self.prompt.write_line(INDEX_QUESTION)?;
            let answer = self.prompt.read_integer();
            self.check_shutdown()?;

            let number = match answer {
                Ok(0) => {
                    log::debug!("Stopped deleting copies of '{}'", group.name());
                    return Ok(GroupOutcome::Stopped(report));
                }
                Ok(value) => value,
                Err(error) => return self.abort_index(group, error, report),
            };

            // Only matches are deletable; number 1 is the anchor
            let target = usize::try_from(number)
                .ok()
                .filter(|&n| n >= 2)
                .and_then(|n| group.listed(n));
            let Some(target) = target else {
                let error = InputError::OutOfRange {
                    value: number,
                    min: 2,
                    max: group.file_count() as i64,
                };
                return self.abort_index(group, error, report);
            };

            match remove_record(target) {
                Ok(deleted) => {
                    self.prompt.write_line(&"File deleted.".green().to_string())?;
                    report.deleted.push(deleted);
                }
                Err(e) => {
                    self.prompt
                        .write_line(&"File not deleted. Error occurred.".red().to_string())?;
                    report.failed.push(e);
                }
            }
        }

        Ok(GroupOutcome::Finished(report))
    }

    fn abort_index(
        &mut self,
        group: &DuplicateGroup,
        error: InputError,
        report: DeletionReport,
    ) -> Result<GroupOutcome, PromptError> {
        self.prompt
            .write_line(&"Wrong number. Files not deleted".yellow().to_string())?;
        log::warn!(
            "Wrong number entered for '{}' files. Files not deleted: {}",
            group.name(),
            error
        );
        Ok(GroupOutcome::Aborted { error, report })
    }

    fn print_listing(&mut self, group: &DuplicateGroup) -> io::Result<()> {
        log::debug!(
            "Listing {} copies of '{}' ({} each)",
            group.file_count(),
            group.name(),
            ByteSize::b(group.size())
        );
        self.prompt.write_line(&"Found copies:".bold().to_string())?;
        for (number, record) in group.listing() {
            self.prompt.write_line(&format!(
                "{}. {}    {}",
                number,
                record.name,
                record.directory.display()
            ))?;
        }
        Ok(())
    }
}

fn in_range(value: i64, min: i64, max: i64) -> Result<usize, InputError> {
    if (min..=max).contains(&value) {
        // min is never negative, so the conversion holds
        Ok(value as usize)
    } else {
        Err(InputError::OutOfRange { value, min, max })
    }
}
