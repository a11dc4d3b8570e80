//! Ordered entry store with journal semantics

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::{CoreError, CoreResult};

/// An ordered, mutable collection of entries.
///
/// Insertion order is the journal order and is independent of the entry
/// dates; chronological views are derived by the balance engine. The store
/// owns its entries exclusively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Journal {
    entries: Vec<Entry>,
}

impl Journal {
    /// Create an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated entry. On failure the store is untouched.
    pub fn append(&mut self, entry: Entry) -> CoreResult<()> {
        entry.validate()?;
        self.entries.push(entry);
        Ok(())
    }

    /// Remove and return the entry at `row` (1-indexed, the display
    /// convention).
    pub fn delete_row(&mut self, row: usize) -> CoreResult<Entry> {
        if row == 0 || row > self.entries.len() {
            return Err(CoreError::RowOutOfRange {
                row,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(row - 1))
    }

    /// Remove all entries. Succeeds even when already empty.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the journal is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in journal order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Serialize to an ordered list of JSON records
    pub fn to_records(&self) -> Vec<serde_json::Value> {
        self.entries.iter().map(Entry::to_record).collect()
    }

    /// Rebuild from a list of JSON records.
    ///
    /// Tolerant by design: malformed rows degrade field by field instead of
    /// failing the load, and are kept read-only. See [`Entry::from_record`].
    pub fn from_records(records: &[serde_json::Value]) -> Self {
        Self {
            entries: records.iter().map(Entry::from_record).collect(),
        }
    }

    /// Rebuild from already-decoded entries (snapshot path)
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

// ==================== Tests ====================
