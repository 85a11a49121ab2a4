//! BibTeX data structures.
//!
//! This module defines the entries produced by the parser and consumed by the
//! formatter.

use crate::EntryType;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// A single bibliography record.
///
/// Field names are stored lower-cased and in the order they were first
/// encountered; values are stored without their enclosing braces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Type of the entry, e.g. `@article`
    pub entry_type: EntryType,
    /// Citation key, unique within a bibliography
    pub name: String,
    fields: Vec<(CompactString, String)>,
}

impl Entry {
    /// Creates an entry with no fields.
    pub fn new(entry_type: EntryType, name: impl Into<String>) -> Self {
        Self {
            entry_type,
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Sets a field, returning the previous value if the field was already
    /// present. A repeated field keeps its original position.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
        let key = CompactString::from(key.to_lowercase());
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    /// Returns the value of a field, looked up case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the entry carries the given field.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over `(field, value)` pairs in encounter order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the entry has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parsed entries keyed by their citation key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bibliography {
    entries: BTreeMap<String, Entry>,
}

impl Bibliography {
    /// Creates an empty bibliography.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, handing it back if its name is already taken.
    pub(crate) fn try_insert(&mut self, entry: Entry) -> Result<&mut Entry, Entry> {
        match self.entries.entry(entry.name.clone()) {
            btree_map::Entry::Occupied(_) => Err(entry),
            btree_map::Entry::Vacant(slot) => Ok(slot.insert(entry)),
        }
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.get_mut(name)
    }

    /// Looks up an entry by citation key.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Iterates over the entries, ordered by citation key.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
