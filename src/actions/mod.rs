//! File actions module.
//!
//! This module provides functionality for:
//! - Interactive review of duplicate groups
//! - Permanent single-file deletion
//!
//! # Review
//!
//! The prompt module lists each group and, when deletion is enabled, asks
//! how many copies to remove and which ones. Input is read through the
//! [`Prompt`] trait so tests can script the conversation.
//!
//! ```no_run
//! use dupe_remover::actions::{ConsolePrompt, DeletionPrompt};
//!
//! let prompt = DeletionPrompt::new(ConsolePrompt::stdio(), true);
//! ```
//!
//! # Deletion
//!
//! Files are removed permanently; the anchor of a group is never offered
//! for deletion.

pub mod delete;
pub mod prompt;

// Re-export commonly used types
pub use delete::{remove_record, DeleteError, DeleteResult};

pub use prompt::{
    ConsolePrompt, DeletionPrompt, DeletionReport, GroupOutcome, InputError, Prompt, PromptError,
};
