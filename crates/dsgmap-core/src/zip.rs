//! US ZIP code validation.

/// Returns `true` when `zip` is exactly five ASCII digits (`"15108"`).
///
/// ZIP+4 forms and surrounding whitespace are rejected; callers should trim
/// user input first.
#[must_use]
pub fn is_valid_zip_code(zip: &str) -> bool {
    zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit())
}
