//! Schema check for written .bib files.
//!
//! The checker rescans the text on its own, without going through the parser,
//! tracking only the current entry and the field names seen so far. A missing
//! mandatory field is an error; fields the schema does not know about are
//! reported as [`SchemaWarning`]s and logged.

use crate::regex::Regex;
use crate::{BibError, EntryType, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z]+)\s*\{\s*([^\s,{}]+)\s*,?$").unwrap());

/// Fields of an entry that are neither mandatory nor optional for its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaWarning {
    /// Citation key of the entry
    pub entry: String,
    pub entry_type: EntryType,
    /// Unexpected field names, lower-case and sorted
    pub fields: Vec<String>,
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found unexpected fields: [{}] in {} (@{})",
            self.fields.join(", "),
            self.entry,
            self.entry_type
        )
    }
}

/// The entry being scanned.
struct OpenEntry {
    entry_type: EntryType,
    name: String,
    fields: Vec<String>,
}

impl OpenEntry {
    /// Checks the collected fields against the schema of the entry type.
    fn close(self) -> Result<Option<SchemaWarning>> {
        let OpenEntry {
            entry_type,
            name,
            fields,
        } = self;

        let missing: Vec<String> = entry_type
            .mandatory_fields()
            .iter()
            .filter(|f| !fields.iter().any(|seen| seen == *f))
            .map(|f| f.to_string())
            .sorted()
            .collect();
        if !missing.is_empty() {
            return Err(BibError::MissingMandatoryField {
                entry: name,
                missing,
            });
        }

        let unexpected: Vec<String> = fields
            .into_iter()
            .filter(|f| !entry_type.is_known_field(f))
            .sorted()
            .dedup()
            .collect();
        if unexpected.is_empty() {
            return Ok(None);
        }

        let warning = SchemaWarning {
            entry: name,
            entry_type,
            fields: unexpected,
        };
        log::warn!("{warning}");
        Ok(Some(warning))
    }
}

/// Checks entries for missing mandatory and unexpected optional fields.
#[derive(Debug, Default, Clone)]
pub struct SchemaChecker;

impl SchemaChecker {
    /// Creates a new schema checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scans .bib text entry by entry.
    ///
    /// An entry still open at the next header or at the end of the input is
    /// checked as if it had been closed.
    ///
    /// # Errors
    ///
    /// Returns [`BibError::UnknownEntryType`] for a type outside the schema,
    /// [`BibError::MissingMandatoryField`] for the first entry lacking a
    /// required field, and [`BibError::Syntax`] for an entry header without a
    /// name.
    pub fn check(&self, input: &str) -> Result<Vec<SchemaWarning>> {
        let mut warnings = Vec::new();
        let mut current: Option<OpenEntry> = None;

        for (index, line) in input.lines().enumerate() {
            let line = line.trim();

            if line.starts_with('@') {
                let (_, [entry_type, name]) = HEADER_REGEX
                    .captures(line)
                    .ok_or_else(|| BibError::Syntax {
                        line: index + 1,
                        content: line.to_string(),
                    })?
                    .extract();
                if let Some(entry) = current.take() {
                    warnings.extend(entry.close()?);
                }
                current = Some(OpenEntry {
                    entry_type: entry_type.parse()?,
                    name: name.to_string(),
                    fields: Vec::new(),
                });
            } else if let Some((field, _)) = line.split_once(" = ") {
                if let Some(entry) = current.as_mut() {
                    entry.fields.push(field.trim().to_lowercase());
                }
            } else if line.starts_with('}') {
                if let Some(entry) = current.take() {
                    warnings.extend(entry.close()?);
                }
            }
        }

        if let Some(entry) = current {
            warnings.extend(entry.close()?);
        }

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check_valid_entries() {
        let input = r#"@article {alice05,
    AUTHOR = {Alice, A.},
    TITLE = {Earlier},
    JOURNAL = {J. Tests},
    YEAR = {2005},
    DOI = {10.1000/x},
}

@unpublished {carol22,
    AUTHOR = {Carol, C.},
    TITLE = {Draft},
    NOTE = {2022},
}
"#;
        assert!(SchemaChecker::new().check(input).unwrap().is_empty());
    }

    #[test]
    fn test_check_missing_mandatory() {
        let input = "@book {knuth84,\n    AUTHOR = {Knuth, D. E.},\n    YEAR = {1984},\n}\n";
        let err = SchemaChecker::new().check(input).unwrap_err();
        match err {
            BibError::MissingMandatoryField { entry, missing } => {
                assert_eq!(entry, "knuth84");
                assert_eq!(missing, vec!["publisher".to_string(), "title".to_string()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_check_unexpected_field_is_warning() {
        let input = r#"@misc {notes19,
    YEAR = {2019},
    RANDOMFIELD = {x},
    ABSTRACT = {y},
}

@misc {later20,
    YEAR = {2020},
}
"#;
        let warnings = SchemaChecker::new().check(input).unwrap();
        assert_eq!(
            warnings,
            vec![SchemaWarning {
                entry: "notes19".to_string(),
                entry_type: EntryType::Misc,
                fields: vec!["abstract".to_string(), "randomfield".to_string()],
            }]
        );
        assert_eq!(
            warnings[0].to_string(),
            "Found unexpected fields: [abstract, randomfield] in notes19 (@misc)"
        );
    }

    #[test]
    fn test_check_unknown_type() {
        let err = SchemaChecker::new()
            .check("@manual {m01,\n}\n")
            .unwrap_err();
        assert!(matches!(err, BibError::UnknownEntryType(ref t) if t == "manual"));
    }

    #[test]
    fn test_check_header_without_name() {
        let err = SchemaChecker::new().check("@article\n").unwrap_err();
        assert!(matches!(err, BibError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_check_unclosed_entry_at_end() {
        let err = SchemaChecker::new()
            .check("@phdthesis {doe99,\n    AUTHOR = {Doe, J.},\n")
            .unwrap_err();
        assert!(matches!(
            err,
            BibError::MissingMandatoryField { ref missing, .. }
                if missing == &["school", "title", "year"]
        ));
    }
}
