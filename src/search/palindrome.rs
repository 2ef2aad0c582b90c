//! Palindrome detection over normalized text.

use crate::search::normalizer::normalize;

/// Shortest normalized query that can count as a palindrome.
///
/// Keeps one- and two-character inputs such as `"a"` or `"aa"` from
/// triggering discounts.
pub const MIN_PALINDROME_LEN: usize = 3;

/// True when the normalized form of `text` has at least
/// [`MIN_PALINDROME_LEN`] characters and reads the same reversed.
pub fn is_palindrome(text: &str) -> bool {
    let normalized = normalize(text);

    // normalized is pure ASCII, so bytes are characters
    let bytes = normalized.as_bytes();
    if bytes.len() < MIN_PALINDROME_LEN {
        return false;
    }

    bytes.iter().eq(bytes.iter().rev())
}
