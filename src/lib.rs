//! A small library for keeping BibTeX bibliographies tidy.
//!
//! `bibsort` reads a constrained, line-oriented flavour of BibTeX, validates
//! author names, sorts entries by year and name, and writes them back with a
//! canonical field order. An independent schema pass then confirms that every
//! entry carries the fields its type requires.
//!
//! # Key Features
//!
//! - **Strict line parser**: every line is an entry header, a field, a closing
//!   brace or blank; anything else is rejected with its line number
//! - **Author validation**: `Lastname, Firstname I.` syntax with a fixed set of
//!   surname prefixes and Latin diacritics
//! - **Deterministic output**: entries ordered by `(year, name)`, fields by the
//!   per-type schema, so re-running the sort never changes the file
//! - **Schema check**: missing mandatory fields are errors, unexpected fields
//!   are warnings
//! - **.bbl rewriting**: English phrases of a formatted bibliography translated
//!   to Polish
//!
//! # Basic Usage
//!
//! ```rust
//! use bibsort::{BibtexParser, format_bibliography};
//!
//! let input = "@article {bob21,
//!     AUTHOR = {Bob, Robert},
//!     TITLE = {Later},
//!     JOURNAL = {J. Tests},
//!     YEAR = {2021},
//! }
//!
//! @article {alice05,
//!     TITLE = {Earlier},
//!     AUTHOR = {Alice, A.},
//!     JOURNAL = {J. Tests},
//!     YEAR = {2005},
//! }
//! ";
//!
//! let bibliography = BibtexParser::new().parse(input).unwrap();
//! let output = format_bibliography(&bibliography).unwrap();
//! assert!(output.starts_with("@article {alice05,\n    AUTHOR = {Alice, A.},"));
//! ```
//!
//! # Schema Check
//!
//! ```rust
//! use bibsort::SchemaChecker;
//!
//! let input = "@misc {notes19,\n    YEAR = {2019},\n    RANDOMFIELD = {x},\n}\n";
//! let warnings = SchemaChecker::new().check(input).unwrap();
//! assert_eq!(warnings[0].fields, vec!["randomfield".to_string()]);
//! ```
//!
//! # Error Handling
//!
//! The library uses a custom [`Result`] type that wraps [`BibError`]. All
//! errors are fatal for the run that produced them; schema warnings are
//! returned as [`SchemaWarning`] values instead.
//!
//! ```rust
//! use bibsort::{BibError, BibtexParser};
//!
//! match BibtexParser::new().parse("% a comment\n") {
//!     Err(BibError::Syntax { line, .. }) => assert_eq!(line, 1),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use thiserror::Error;

pub mod authors;
pub mod bbl;
pub mod bibtex;
pub mod check;
pub mod config;
pub mod format;
pub mod pipeline;
mod regex;
pub mod schema;
mod utils;

// Reexports
pub use bbl::BblRewriter;
pub use bibtex::{BibtexParser, Bibliography, Entry};
pub use check::{SchemaChecker, SchemaWarning};
pub use config::SortConfig;
pub use format::{format_bibliography, format_entry, sort_entries};
pub use pipeline::{SortReport, check_file, rewrite_bbl_file, sort_file};
pub use schema::EntryType;

/// A specialized Result type for bibliography operations.
pub type Result<T> = std::result::Result<T, BibError>;

/// Represents errors that can occur while processing a bibliography.
#[derive(Error, Debug)]
pub enum BibError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Syntax error in .bib file at line {line}: {content}")]
    Syntax { line: usize, content: String },

    #[error("Malformed value for {field} at line {line}: {value} does not start with a brace")]
    MalformedValue {
        field: String,
        value: String,
        line: usize,
    },

    #[error("Field {field} at line {line} does not belong to any entry")]
    OrphanField { field: String, line: usize },

    #[error("Duplicate entry name: {0}")]
    DuplicateEntry(String),

    #[error("Incorrect author syntax '{author}' in '{authors}'")]
    AuthorSyntax { author: String, authors: String },

    #[error("Cannot find year in {0}")]
    MissingYear(String),

    #[error("Unknown entry type: @{0}")]
    UnknownEntryType(String),

    #[error("Missing {} in {entry}", .missing.join(", "))]
    MissingMandatoryField { entry: String, missing: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bib_error_display() {
        let error = BibError::Syntax {
            line: 3,
            content: "% comment".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Syntax error in .bib file at line 3: % comment"
        );
    }

    #[test]
    fn test_missing_fields_display() {
        let error = BibError::MissingMandatoryField {
            entry: "knuth84".to_string(),
            missing: vec!["journal".to_string(), "year".to_string()],
        };
        assert_eq!(error.to_string(), "Missing journal, year in knuth84");
    }
}
