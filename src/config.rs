//! Configuration for the sort pipeline.

/// Switches for [`crate::sort_file`].
///
/// # Examples
///
/// ```
/// use bibsort::SortConfig;
///
/// let config = SortConfig {
///     dry_run: true,
///     ..Default::default()
/// };
/// assert!(config.validate_authors);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    /// Validate `author` fields while parsing
    pub validate_authors: bool,
    /// Run the schema check after writing
    pub check_schema: bool,
    /// Leave the file untouched and only return the sorted text
    pub dry_run: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            validate_authors: true,
            check_schema: true,
            dry_run: false,
        }
    }
}
