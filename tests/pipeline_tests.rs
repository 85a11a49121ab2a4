use bibsort::{BibError, BblRewriter, SortConfig, check_file, rewrite_bbl_file, sort_file};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

const UNSORTED: &str = r#"@article {bob21,
  TITLE = {Later},
  AUTHOR = {Bob, Robert},
  JOURNAL = {J. Tests},
  YEAR = {2021},
}

@misc {notes19,
  YEAR = {2019},
  RANDOMFIELD = {x},
}

@unpublished {alice,
  NOTE = {2005},
  TITLE = {Draft},
  AUTHOR = {Alice, A.},
}
"#;

const SORTED: &str = r#"@unpublished {alice,
    AUTHOR = {Alice, A.},
    TITLE = {Draft},
    NOTE = {2005},
}

@misc {notes19,
    YEAR = {2019},
    RANDOMFIELD = {x},
}

@article {bob21,
    AUTHOR = {Bob, Robert},
    TITLE = {Later},
    JOURNAL = {J. Tests},
    YEAR = {2021},
}

"#;

fn bib_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_sort_file_rewrites_in_place() {
    let file = bib_file(UNSORTED);

    let report = sort_file(file.path(), &SortConfig::default()).unwrap();
    assert_eq!(report.entries, 3);
    assert_eq!(fs::read_to_string(file.path()).unwrap(), SORTED);
    assert_eq!(report.output, SORTED);

    // the unexpected misc field is reported but does not stop the run
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].entry, "notes19");
    assert_eq!(report.warnings[0].fields, vec!["randomfield".to_string()]);
}

#[test]
fn test_sort_file_is_idempotent() {
    let file = bib_file(UNSORTED);
    sort_file(file.path(), &SortConfig::default()).unwrap();
    let first = fs::read_to_string(file.path()).unwrap();

    sort_file(file.path(), &SortConfig::default()).unwrap();
    assert_eq!(fs::read_to_string(file.path()).unwrap(), first);
}

#[test]
fn test_sort_file_dry_run_leaves_file() {
    let file = bib_file(UNSORTED);
    let config = SortConfig {
        dry_run: true,
        ..Default::default()
    };

    let report = sort_file(file.path(), &config).unwrap();
    assert_eq!(report.output, SORTED);
    assert_eq!(fs::read_to_string(file.path()).unwrap(), UNSORTED);
}

#[test]
fn test_sort_file_error_leaves_file() {
    let input = "@article {x01,\n  AUTHOR = {smith, J.},\n  YEAR = {2000},\n}\n";
    let file = bib_file(input);

    let err = sort_file(file.path(), &SortConfig::default()).unwrap_err();
    assert!(matches!(err, BibError::AuthorSyntax { .. }));
    assert_eq!(fs::read_to_string(file.path()).unwrap(), input);
}

#[test]
fn test_sort_file_missing_mandatory_after_write() {
    let input = "@book {knuth84,\n  AUTHOR = {Knuth, D. E.},\n  YEAR = {1984},\n}\n";
    let file = bib_file(input);

    let err = sort_file(file.path(), &SortConfig::default()).unwrap_err();
    assert!(matches!(err, BibError::MissingMandatoryField { .. }));
    // the sorted text was already written
    assert_eq!(
        fs::read_to_string(file.path()).unwrap(),
        "@book {knuth84,\n    AUTHOR = {Knuth, D. E.},\n    YEAR = {1984},\n}\n\n"
    );

    let config = SortConfig {
        check_schema: false,
        ..Default::default()
    };
    assert!(sort_file(file.path(), &config).unwrap().warnings.is_empty());
}

#[test]
fn test_check_file() {
    let file = bib_file(SORTED);
    let warnings = check_file(file.path()).unwrap();
    assert_eq!(warnings.len(), 1);
}

#[test]
fn test_missing_file() {
    let err = check_file("/nonexistent/bibliography.bib").unwrap_err();
    assert!(matches!(err, BibError::Io(_)));
}

#[test]
fn test_rewrite_bbl_file() {
    let file = bib_file(
        "\\bibitem{x}\nSmith, J. and\nDoe, A.\n\\newblock PhD thesis, Warsaw, 2001.\n",
    );
    rewrite_bbl_file(file.path(), &BblRewriter::new()).unwrap();
    assert_eq!(
        fs::read_to_string(file.path()).unwrap(),
        "\n\n\\bibitem{x}\nSmith, J. oraz Doe, A.\n\\newblock Praca doktorska, Warsaw, 2001."
    );
}
