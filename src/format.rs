//! Sorting and serialization of parsed entries.
//!
//! Entries are ordered by `(year, name)` and written back one field per line,
//! with upper-case field names and the per-type canonical field order:
//! mandatory fields, then optional fields, then anything else in the order it
//! was read. The output only depends on the entries themselves, so formatting
//! a file twice gives the same bytes.

use crate::utils::parse_year;
use crate::{BibError, Bibliography, Entry, Result};
use itertools::Itertools;

/// Extracts the year an entry is sorted by.
///
/// The `year` field is tried first, then `note`, since `@unpublished` entries
/// usually carry their date there.
///
/// # Errors
///
/// Returns [`BibError::MissingYear`] when neither field holds a plain year.
pub fn entry_year(entry: &Entry) -> Result<i32> {
    entry
        .get("year")
        .and_then(parse_year)
        .or_else(|| entry.get("note").and_then(parse_year))
        .ok_or_else(|| BibError::MissingYear(entry.name.clone()))
}

/// The `(year, name)` key entries are sorted by.
pub fn sort_key(entry: &Entry) -> Result<(i32, &str)> {
    let key = (entry_year(entry)?, entry.name.as_str());
    log::debug!("sort_key => {} {}", key.0, key.1);
    Ok(key)
}

/// Orders all entries by year, then by name.
pub fn sort_entries(bibliography: &Bibliography) -> Result<Vec<&Entry>> {
    let keyed = bibliography
        .iter()
        .map(|entry| sort_key(entry).map(|key| (key, entry)))
        .collect::<Result<Vec<_>>>()?;

    Ok(keyed
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, entry)| entry)
        .collect())
}

/// Field names of `entry` in the order they are written out.
pub fn field_order(entry: &Entry) -> Vec<&str> {
    let canonical: Vec<&str> = entry.entry_type.canonical_order();
    let known = canonical.iter().copied().filter(|f| entry.contains(f));
    let extra = entry
        .fields()
        .map(|(key, _)| key)
        .filter(|key| !canonical.contains(key));
    known.chain(extra).collect()
}

/// Serializes a single entry, followed by a blank separator line.
///
/// # Example
///
/// ```
/// use bibsort::{Entry, EntryType, format_entry};
///
/// let mut entry = Entry::new(EntryType::Book, "knuth84");
/// entry.insert("year", "1984");
/// entry.insert("title", "The TeXbook");
///
/// assert_eq!(
///     format_entry(&entry),
///     "@book {knuth84,\n    TITLE = {The TeXbook},\n    YEAR = {1984},\n}\n\n"
/// );
/// ```
pub fn format_entry(entry: &Entry) -> String {
    let mut output = format!("@{} {{{},\n", entry.entry_type, entry.name);
    for key in field_order(entry) {
        let value = entry.get(key).unwrap_or_default();
        output.push_str(&format!("    {} = {{{}}},\n", key.to_uppercase(), value));
    }
    output.push_str("}\n\n");
    output
}

/// Sorts and serializes a whole bibliography.
///
/// # Errors
///
/// Returns [`BibError::MissingYear`] if any entry has no usable year; nothing
/// is produced in that case.
pub fn format_bibliography(bibliography: &Bibliography) -> Result<String> {
    Ok(sort_entries(bibliography)?
        .into_iter()
        .map(format_entry)
        .collect())
}
