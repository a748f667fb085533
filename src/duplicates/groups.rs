//! Duplicate grouping by file name and size.
//!
//! # Overview
//!
//! The [`Grouper`] walks the scanned record collection with an explicit
//! cursor. For every record that has not been claimed yet, all *later*
//! records sharing its name and size become its matches and are marked
//! `checked`, so they never anchor a group of their own.
//!
//! Candidates are looked up through a (name, size) index built once per
//! grouper. Groups come out in the same order, with the same members, as a
//! pairwise comparison of every record against every later record.
//!
//! # Example
//!
//! ```
//! use dupe_remover::duplicates::find_duplicate_groups;
//! use dupe_remover::scanner::FileRecord;
//!
//! let mut records = vec![
//!     FileRecord::new("report.txt", 10, "/a"),
//!     FileRecord::new("report.txt", 10, "/b"),
//!     FileRecord::new("report.txt", 99, "/c"),
//! ];
//!
//! let groups = find_duplicate_groups(&mut records);
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].anchor.directory.to_str(), Some("/a"));
//! assert_eq!(groups[0].matches.len(), 1);
//! assert!(records[1].checked);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{DuplicateKey, FileRecord};

/// An anchor record plus every later record sharing its name and size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// First-encountered record of the group, listed as number 1
    pub anchor: FileRecord,
    /// Later records with the same name and size, in scan order
    pub matches: Vec<FileRecord>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(anchor: FileRecord, matches: Vec<FileRecord>) -> Self {
        Self { anchor, matches }
    }

    /// Shared file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.anchor.name
    }

    /// Shared file size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.anchor.size
    }

    /// Number of files in this group, anchor included.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.matches.len() + 1
    }

    /// Number of matches (copies beyond the anchor).
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Record listed under `number` (1 is the anchor, 2.. are the matches).
    #[must_use]
    pub fn listed(&self, number: usize) -> Option<&FileRecord> {
        match number {
            0 => None,
            1 => Some(&self.anchor),
            n => self.matches.get(n - 2),
        }
    }

    /// Records in listing order with their numbers.
    pub fn listing(&self) -> impl Iterator<Item = (usize, &FileRecord)> {
        std::iter::once(&self.anchor)
            .chain(self.matches.iter())
            .enumerate()
            .map(|(i, record)| (i + 1, record))
    }

    /// Full paths of all files in listing order.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.listing().map(|(_, r)| r.path()).collect()
    }
}

/// Cursor-driven duplicate grouping over a record collection.
///
/// Yields one [`DuplicateGroup`] per unchecked record that has at least one
/// later match. Matches are marked `checked`; the anchor is left as is.
#[derive(Debug)]
pub struct Grouper<'a> {
    records: &'a mut [FileRecord],
    /// Bucket id of every record
    bucket_of: Vec<usize>,
    /// Record indices per (name, size), ascending
    buckets: Vec<Vec<usize>>,
    cursor: usize,
}

impl<'a> Grouper<'a> {
    /// Index the records by (name, size) and position the cursor at 0.
    #[must_use]
    pub fn new(records: &'a mut [FileRecord]) -> Self {
        let mut bucket_of = Vec::with_capacity(records.len());
        let mut buckets: Vec<Vec<usize>> = Vec::new();
        {
            let mut ids: HashMap<DuplicateKey<'_>, usize> = HashMap::new();
            for (i, record) in records.iter().enumerate() {
                let next = buckets.len();
                let id = *ids.entry(record.key()).or_insert(next);
                if id == next {
                    buckets.push(Vec::new());
                }
                buckets[id].push(i);
                bucket_of.push(id);
            }
        }

        log::debug!(
            "Indexed {} records into {} name/size buckets",
            records.len(),
            buckets.len()
        );

        Self {
            records,
            bucket_of,
            buckets,
            cursor: 0,
        }
    }

    /// Index of the next record to examine.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Build the group anchored at `i`, claiming its matches.
    fn group_at(&mut self, i: usize) -> Option<DuplicateGroup> {
        if self.records[i].checked {
            return None;
        }

        let later: Vec<usize> = self.buckets[self.bucket_of[i]]
            .iter()
            .copied()
            .filter(|&j| j > i)
            .collect();
        if later.is_empty() {
            return None;
        }

        let mut matches = Vec::with_capacity(later.len());
        for j in later {
            self.records[j].checked = true;
            matches.push(self.records[j].clone());
        }

        log::trace!(
            "Record {} ({}) has {} later copies",
            i,
            self.records[i].name,
            matches.len()
        );
        Some(DuplicateGroup::new(self.records[i].clone(), matches))
    }
}

impl Iterator for Grouper<'_> {
    type Item = DuplicateGroup;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.records.len() {
            let i = self.cursor;
            self.cursor += 1;
            if let Some(group) = self.group_at(i) {
                return Some(group);
            }
        }
        None
    }
}

/// Run a full grouping pass and collect every group.
pub fn find_duplicate_groups(records: &mut [FileRecord]) -> Vec<DuplicateGroup> {
    Grouper::new(records).collect()
}
