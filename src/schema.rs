//! BibTeX entry types and their field schema.
//!
//! Every supported entry type carries two ordered field lists: the fields an
//! entry of that type must have, and the fields it may have. A shared list of
//! type-agnostic optional fields (identifiers, pages, review metadata) is
//! allowed on every type on top of its own optional fields.

use crate::{BibError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Optional fields accepted on any entry type.
pub const TYPE_AGNOSTIC_FIELDS: &[&str] = &[
    "doi",
    "pages",
    "url",
    "issn",
    "isbn",
    // MathSciNet
    "mrclass",
    "mrnumber",
    "mrreviewer",
    // Zentralblatt MATH
    "zbl",
];

/// Supported BibTeX entry types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// @article - An article from a journal or magazine
    Article,
    /// @book - A book with an explicit publisher
    Book,
    /// @incollection - A part of a book having its own title
    InCollection,
    /// @inproceedings - An article in a conference proceedings
    InProceedings,
    /// @misc - Anything that does not fit the other types
    Misc,
    /// @phdthesis - A PhD thesis
    PhdThesis,
    /// @unpublished - A document not formally published, dated through its note
    Unpublished,
}

impl EntryType {
    /// All supported entry types.
    pub const ALL: [EntryType; 7] = [
        EntryType::Article,
        EntryType::Book,
        EntryType::InCollection,
        EntryType::InProceedings,
        EntryType::Misc,
        EntryType::PhdThesis,
        EntryType::Unpublished,
    ];

    /// Look up an entry type by name, ignoring case and a leading `@`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix('@').unwrap_or(name);
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }

    /// The lower-case name used after `@` in a .bib file.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Article => "article",
            EntryType::Book => "book",
            EntryType::InCollection => "incollection",
            EntryType::InProceedings => "inproceedings",
            EntryType::Misc => "misc",
            EntryType::PhdThesis => "phdthesis",
            EntryType::Unpublished => "unpublished",
        }
    }

    /// Fields an entry of this type must carry, in canonical order.
    pub fn mandatory_fields(&self) -> &'static [&'static str] {
        match self {
            EntryType::Article => &["author", "title", "journal", "year"],
            EntryType::Book => &["author", "title", "publisher", "year"],
            EntryType::InCollection => &["author", "title", "booktitle", "publisher", "year"],
            EntryType::InProceedings => &["author", "title", "booktitle", "year"],
            EntryType::Misc => &[],
            EntryType::PhdThesis => &["author", "title", "school", "year"],
            EntryType::Unpublished => &["author", "title", "note"],
        }
    }

    /// Optional fields specific to this type, in canonical order.
    ///
    /// See [`EntryType::optional_fields`] for the list including
    /// [`TYPE_AGNOSTIC_FIELDS`].
    pub fn own_optional_fields(&self) -> &'static [&'static str] {
        match self {
            EntryType::Article => &["fjournal", "volume", "number", "pages", "month", "note"],
            EntryType::Book => &[
                "volume", "number", "series", "address", "edition", "month", "note",
            ],
            EntryType::InCollection => &[
                "editor", "volume", "number", "series", "type", "chapter", "pages", "address",
                "edition", "month", "note",
            ],
            EntryType::InProceedings => &[
                "editor",
                "volume",
                "number",
                "series",
                "pages",
                "address",
                "month",
                "organization",
                "publisher",
                "note",
            ],
            EntryType::Misc => &["author", "title", "howpublished", "month", "year", "note"],
            EntryType::PhdThesis => &["type", "address", "month", "note"],
            EntryType::Unpublished => &["month", "year"],
        }
    }

    /// All optional fields of this type: its own, followed by the
    /// type-agnostic ones it does not already list.
    pub fn optional_fields(&self) -> Vec<&'static str> {
        let own = self.own_optional_fields();
        own.iter()
            .copied()
            .chain(
                TYPE_AGNOSTIC_FIELDS
                    .iter()
                    .copied()
                    .filter(|f| !own.contains(f)),
            )
            .collect()
    }

    /// Mandatory followed by optional fields; the order used when writing
    /// an entry back out.
    pub fn canonical_order(&self) -> Vec<&'static str> {
        let mut order = self.mandatory_fields().to_vec();
        order.extend(self.optional_fields());
        order
    }

    /// Whether `field` (lower-case) is mandatory or optional for this type.
    pub fn is_known_field(&self, field: &str) -> bool {
        self.mandatory_fields().contains(&field)
            || self.own_optional_fields().contains(&field)
            || TYPE_AGNOSTIC_FIELDS.contains(&field)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = BibError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| BibError::UnknownEntryType(s.to_string()))
    }
}
