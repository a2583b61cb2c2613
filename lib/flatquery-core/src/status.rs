//! HTTP status classification.

/// Returns `true` for status codes in the 2xx success class.
///
/// # Example
///
/// ```
/// use flatquery_core::is_success_status;
///
/// assert!(is_success_status(204));
/// assert!(!is_success_status(301));
/// ```
#[must_use]
pub const fn is_success_status(code: u16) -> bool {
    matches!(code, 200..=299)
}
