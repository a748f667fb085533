//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Indexing records by (name, size)
//! - Cursor-driven duplicate grouping
//! - Duplicate group management

pub mod groups;

pub use groups::{find_duplicate_groups, DuplicateGroup, Grouper};
