// src/cookbook/store.rs

//! Entry store
//!
//! [`Entries`] is the name index itself: insertion-ordered, unique by exact
//! name, append-only. [`Cookbook`] is the shared context object handed to
//! every request; it guards one `Entries` with a reader/writer lock so that
//! admission (check then insert) is a single critical section and a
//! resolution never observes an insert halfway through its traversal.

use crate::cookbook::model::{Entry, EntryDraft, EntryKind, Summary};
use crate::cookbook::{resolve, validate};
use crate::error::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Name-indexed collection of entries
#[derive(Debug, Default, Clone)]
pub struct Entries {
    /// Entries in insertion order
    entries: Vec<Entry>,
    /// Map from entry name to its position in `entries`
    index: HashMap<String, usize>,
}

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.index.get(name).map(|&pos| &self.entries[pos])
    }

    /// Append an entry, refusing a name that is already taken
    pub fn insert(&mut self, entry: Entry) -> Result<()> {
        if self.contains(entry.name()) {
            return Err(Error::DuplicateName(entry.name().to_string()));
        }

        self.index.insert(entry.name().to_string(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

#[cfg(test)]
impl FromIterator<Entry> for Entries {
    /// Collect entries, keeping the first of any duplicated name
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut entries = Entries::new();
        for entry in iter {
            let _ = entries.insert(entry);
        }
        entries
    }
}

/// The process-wide cookbook, shared across request handlers
#[derive(Debug, Default)]
pub struct Cookbook {
    entries: RwLock<Entries>,
}

impl Cookbook {
    /// Create an empty cookbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a submitted entry and insert it
    ///
    /// Validation and insertion happen under one write lock, so two
    /// concurrent submissions of the same name cannot both succeed.
    pub fn admit(&self, draft: EntryDraft) -> Result<EntryKind> {
        let mut entries = self.entries.write();
        let entry = validate::validate(draft, &entries)?;
        let kind = entry.kind();
        entries.insert(entry)?;
        debug!("Cookbook now holds {} entries", entries.len());
        Ok(kind)
    }

    /// Look up an entry by exact name
    pub fn lookup(&self, name: &str) -> Option<Entry> {
        self.entries.read().get(name).cloned()
    }

    /// Resolve a recipe into its flattened summary
    ///
    /// Holds the read lock for the whole traversal.
    pub fn summarize(&self, name: &str) -> Result<Summary> {
        let entries = self.entries.read();
        resolve::resolve(name, &entries)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
