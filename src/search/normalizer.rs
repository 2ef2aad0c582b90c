//! Canonical text form used for palindrome comparison.

use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks block (U+0300..=U+036F).
fn is_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Lowercase, strip accents, keep only `[a-z0-9]`.
///
/// Accented letters are decomposed (NFD) and their combining marks
/// dropped, so `"Añádir"` becomes `"anadir"`. Total: empty input yields
/// an empty string.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    text.to_lowercase()
        .nfd()
        .filter(|c| !is_diacritic(*c))
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
