//! Text canonicalization for OCR output.
//!
//! Two views of the same text are used by the matcher:
//! - `normalize()`: lower-cased, punctuation unified, whitespace collapsed.
//! - `squash()`: lower-cased ASCII letters and digits only, so that
//!   "N.H.S" and "n h s" both become "nhs".

/// Canonicalize raw OCR text for rule matching.
///
/// Lower-cases, maps the curly apostrophe to `'` and the en-dash to `-`,
/// collapses every whitespace run to a single space and trims both ends.
pub fn normalize(text: &str) -> String {
    let unified: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2019}' => '\'',
            '\u{2013}' => '-',
            other => other,
        })
        .collect();

    unified.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lower-case and drop everything that is not an ASCII letter or digit.
pub fn squash(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
