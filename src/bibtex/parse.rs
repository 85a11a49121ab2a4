//! BibTeX parsing implementation.
//!
//! This module handles the low-level, line-by-line parsing of .bib text.
//! Every line must be one of four shapes; there is no tokenizer and no
//! support for values spanning several lines.

use crate::authors::validate_authors;
use crate::bibtex::structure::{Bibliography, Entry};
use crate::regex::Regex;
use crate::{BibError, EntryType, Result};
use std::sync::LazyLock;

static ENTRY_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z]+) *\{ *([^\s,{}]+),$").unwrap());

static FIELD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+) *= *(\{.*\}|[^{\s].*),$").unwrap());

/// The accepted shapes of a (trimmed) .bib line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// `@article {knuth84,`
    EntryStart { entry_type: &'a str, name: &'a str },
    /// `AUTHOR = {Knuth, D. E.},`
    FieldAssign { key: &'a str, value: &'a str },
    /// `}`
    Close,
    Blank,
}

/// Classify a single line.
///
/// # Errors
///
/// Returns [`BibError::Syntax`] if the line has none of the accepted shapes.
pub(crate) fn classify_line(line: &str, line_number: usize) -> Result<Line<'_>> {
    let line = line.trim();

    if line.is_empty() {
        return Ok(Line::Blank);
    }
    if line == "}" {
        return Ok(Line::Close);
    }
    if let Some(caps) = ENTRY_START_REGEX.captures(line) {
        let (_, [entry_type, name]) = caps.extract();
        return Ok(Line::EntryStart { entry_type, name });
    }
    if let Some(caps) = FIELD_REGEX.captures(line) {
        let (_, [key, value]) = caps.extract();
        return Ok(Line::FieldAssign { key, value });
    }

    Err(BibError::Syntax {
        line: line_number,
        content: line.to_string(),
    })
}

/// Strip the braces enclosing a field value.
///
/// The value must open with `{` and close with `}`; only that outer pair is
/// removed.
fn unwrap_value<'a>(key: &str, value: &'a str, line_number: usize) -> Result<&'a str> {
    value
        .strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .ok_or_else(|| BibError::MalformedValue {
            field: key.to_string(),
            value: value.to_string(),
            line: line_number,
        })
}

/// Parse the content of a .bib file into a [Bibliography].
///
/// Parsing stops at the first error; nothing is returned for the lines that
/// were already read.
pub(crate) fn bibtex_parse<S: AsRef<str>>(bib_text: S, check_authors: bool) -> Result<Bibliography> {
    let mut bibliography = Bibliography::new();
    let mut current: Option<String> = None;

    for (index, line) in bib_text.as_ref().lines().enumerate() {
        let line_number = index + 1;

        match classify_line(line, line_number)? {
            Line::Blank | Line::Close => {}
            Line::EntryStart { entry_type, name } => {
                let entry_type: EntryType = entry_type.parse()?;
                log::debug!("parse_bib => type {entry_type} name {name}");

                bibliography
                    .try_insert(Entry::new(entry_type, name))
                    .map_err(|entry| BibError::DuplicateEntry(entry.name))?;
                current = Some(name.to_string());
            }
            Line::FieldAssign { key, value } => {
                let entry = current
                    .as_deref()
                    .and_then(|name| bibliography.get_mut(name))
                    .ok_or_else(|| BibError::OrphanField {
                        field: key.to_string(),
                        line: line_number,
                    })?;

                let value = unwrap_value(key, value, line_number)?;
                log::debug!("parse_bib => key {} value {value}", key.to_lowercase());

                if check_authors && key.eq_ignore_ascii_case("author") {
                    validate_authors(value)?;
                }

                entry.insert(key, value);
            }
        }
    }

    Ok(bibliography)
}
