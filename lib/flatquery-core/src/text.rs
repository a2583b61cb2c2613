//! Small string helpers.

/// First string of `values` that is not blank, or `""` if there is none.
///
/// A string is blank when it is empty or holds only whitespace. The
/// returned string is not trimmed.
///
/// # Example
///
/// ```
/// use flatquery_core::first_non_empty;
///
/// assert_eq!(first_non_empty(["", "  ", "x", "y"]), "x");
/// assert_eq!(first_non_empty(["", "  "]), "");
/// ```
#[must_use]
pub fn first_non_empty<'a>(values: impl IntoIterator<Item = &'a str>) -> &'a str {
    values
        .into_iter()
        .find(|value| !value.trim().is_empty())
        .unwrap_or_default()
}
