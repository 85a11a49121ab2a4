//! BibTeX parser implementation.
//!
//! Parses the strict, one-field-per-line BibTeX layout this crate writes:
//!
//! ```text
//! @article {knuth84,
//!     AUTHOR = {Knuth, Donald E.},
//!     YEAR = {1984},
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use bibsort::BibtexParser;
//!
//! let input = "@book {knuth84,\n    AUTHOR = {Knuth, Donald E.},\n    YEAR = {1984},\n}\n";
//!
//! let bibliography = BibtexParser::new().parse(input).unwrap();
//! assert_eq!(bibliography.get("knuth84").unwrap().get("year"), Some("1984"));
//! ```

mod parse;
mod structure;

use crate::Result;
use parse::bibtex_parse;

pub use structure::{Bibliography, Entry};

/// Parser for line-oriented BibTeX files.
///
/// Author fields are validated while parsing unless disabled with
/// [`BibtexParser::with_author_validation`].
#[derive(Debug, Clone)]
pub struct BibtexParser {
    validate_authors: bool,
}

impl Default for BibtexParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BibtexParser {
    /// Creates a new parser with author validation enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibsort::BibtexParser;
    /// let parser = BibtexParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            validate_authors: true,
        }
    }

    /// Enables or disables author-name validation.
    #[must_use]
    pub fn with_author_validation(mut self, enabled: bool) -> Self {
        self.validate_authors = enabled;
        self
    }

    /// Parses a string containing a whole .bib file.
    ///
    /// # Arguments
    ///
    /// * `input` - The .bib formatted string to parse
    ///
    /// # Errors
    ///
    /// Returns [`crate::BibError`] for the first unrecognized line, malformed
    /// value, unknown entry type, duplicate entry name or invalid author list.
    pub fn parse(&self, input: &str) -> Result<Bibliography> {
        bibtex_parse(input, self.validate_authors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BibError;

    #[test]
    fn test_parse_two_entries() {
        let input = r#"@article {bob21,
    AUTHOR = {Bob, Robert},
    TITLE = {Later},
    JOURNAL = {J. Tests},
    YEAR = {2021},
}

@article {alice05,
    AUTHOR = {Alice, A.},
    TITLE = {Earlier},
    JOURNAL = {J. Tests},
    YEAR = {2005},
}
"#;
        let bibliography = BibtexParser::new().parse(input).unwrap();
        assert_eq!(bibliography.len(), 2);
        let names: Vec<_> = bibliography.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alice05", "bob21"]);
    }

    #[test]
    fn test_author_validation_switch() {
        let input = "@misc {x01,\n    AUTHOR = {Smith and Jones},\n}\n";

        let err = BibtexParser::new().parse(input).unwrap_err();
        assert!(matches!(err, BibError::AuthorSyntax { .. }));

        let bibliography = BibtexParser::new()
            .with_author_validation(false)
            .parse(input)
            .unwrap();
        assert_eq!(
            bibliography.get("x01").unwrap().get("author"),
            Some("Smith and Jones")
        );
    }
}
