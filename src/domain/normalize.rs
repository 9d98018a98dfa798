//! Text folding for catalog search
//!
//! Both the stored field and the query go through [`fold`], so matching is
//! insensitive to case, surrounding whitespace, punctuation and diacritics.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Characters dropped before comparison.
pub const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '\'', '"', '(', ')', '[', ']', '{', '}', '-', '_', '/', '\\',
    '&', '*', '#', '@',
];

/// Fold `text` into its comparison form.
///
/// ```
/// use libcat::domain::normalize::fold;
/// assert_eq!(fold("  Müller, J.  "), "muller j");
/// ```
pub fn fold(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.trim().nfd() {
        if is_combining_mark(c) || STRIPPED_PUNCTUATION.contains(&c) {
            continue;
        }
        for lower in c.to_lowercase() {
            match lower {
                'ß' => folded.push_str("ss"),
                'æ' => folded.push_str("ae"),
                'œ' => folded.push_str("oe"),
                'þ' => folded.push_str("th"),
                'ø' => folded.push('o'),
                'ł' => folded.push('l'),
                'đ' | 'ð' => folded.push('d'),
                other => folded.push(other),
            }
        }
    }
    // punctuation removal can expose whitespace at either end
    folded.trim().to_string()
}

/// Whether folded `needle` occurs in folded `haystack`.
///
/// A needle that folds to nothing matches nothing.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    let needle = fold(needle);
    !needle.is_empty() && fold(haystack).contains(&needle)
}
