//! Text normalization for cross-OCR-pass identity.
//!
//! Handwriting OCR is noisy: successive passes over the same ink disagree on
//! case, spacing, diacritics and stray punctuation. Two normal forms are
//! used when comparing passes:
//!
//! - [`normalize`]: trimmed, lowercased -- used for containment checks
//!   between a stored timer's text and an observation's candidate lines.
//! - [`canonical_token`]: case- and diacritic-folded with everything
//!   non-alphanumeric stripped -- the robust identity for a matched time
//!   expression ("1h 30m", "1 H 30 M" and "1h30m" all collapse to "1h30m").

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Trimmed, lowercased form for containment-style comparisons.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Canonical match token: diacritics folded away, lowercased, and all
/// non-alphanumeric characters stripped.
///
/// Returns an empty string when nothing alphanumeric remains.
pub fn canonical_token(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}
