/// Removes every `{` and `}` from a field value.
pub fn strip_braces(value: &str) -> String {
    value.replace(['{', '}'], "")
}

/// Parses a year out of a raw field value such as `{2021}` or `{2021},`.
///
/// Spaces, braces and commas are dropped and the rest must be an integer,
/// so `{in preparation}` yields `None`.
///
/// # Arguments
///
/// * `value` - The field value to parse
pub fn parse_year(value: &str) -> Option<i32> {
    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '{' | '}' | ','))
        .collect();
    digits.parse().ok()
}
