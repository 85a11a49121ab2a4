//! Author-list validation.
//!
//! Author fields are expected in the canonical `Lastname, Firstname I.` form,
//! joined with ` and `. Surnames may carry one of a few prefixes (`De `, `Mc`,
//! `Van `, `van `, `van der `) and may be double-barrelled; given names may be
//! hyphenated, followed by initials, or consist of initials only.
//!
//! # Example
//!
//! ```
//! use bibsort::authors::validate_authors;
//!
//! assert!(validate_authors("Smith, J. and van der Berg, Anna").is_ok());
//! assert!(validate_authors("Smith and Jones").is_err());
//! ```

use crate::regex::Regex;
use crate::utils::strip_braces;
use crate::{BibError, Result};
use std::sync::LazyLock;

/// Separator between authors in a BibTeX author list.
pub const AUTHOR_SEPARATOR: &str = " and ";

// Lowercase diacritics are too numerous to list exhaustively; these are the
// ones seen in practice.
const UPPER: &str = "[A-ZÉÖŠ]";
const LOWER: &str = "[a-zßáäâèéêíñóöüćł]";

static AUTHOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let word = format!("{UPPER}{LOWER}+");
    let initial = format!(r"(?:Mc)?{UPPER}\.");
    let pattern = format!(
        "^(?:De |Mc|Van |van |van der )?{word}(?:-{word})?, \
         (?:(?:{word}-|De )?{word}|{initial})(?: {initial})*$"
    );
    Regex::new(&pattern).unwrap()
});

/// Checks a single author name, e.g. `Heath-Brown, David R.`.
pub fn is_valid_author(author: &str) -> bool {
    AUTHOR_REGEX.is_match(author)
}

/// Validates every author of a ` and `-joined author list.
///
/// Braces are removed before validation, so `{\v{S}koda}`-style grouping does
/// not matter, but the characters inside them still do.
///
/// # Errors
///
/// Returns [`BibError::AuthorSyntax`] naming the first offending author and
/// the whole list.
pub fn validate_authors(authors: &str) -> Result<()> {
    let authors = strip_braces(authors);
    match authors
        .split(AUTHOR_SEPARATOR)
        .find(|author| !is_valid_author(author))
    {
        Some(author) => Err(BibError::AuthorSyntax {
            author: author.to_string(),
            authors: authors.clone(),
        }),
        None => Ok(()),
    }
}
