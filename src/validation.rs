//! Lightweight key and locator checks.

use crate::dictionary::KEY_SEPARATOR;

/// Checks that a key has at least two segments.
///
/// This is a hygiene lint, not a dictionary membership check: a dotted key
/// that does not exist in the dictionary is still valid here.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    key.contains(KEY_SEPARATOR)
}

/// Checks whether a resource locator points at a network location.
#[must_use]
pub fn is_url(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}
