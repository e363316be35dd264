//! OCR-tolerant token matching.
//!
//! A token is present in a haystack when any of three checks passes:
//! 1. literal substring of the lower-cased haystack
//! 2. substring of the squashed haystack (symbols and spaces removed)
//! 3. fuzzy regex: the token's letters in order, with any run of
//!    non-word characters allowed between them ("N H-S" matches "nhs")
//!
//! None of the checks tolerate missing or substituted characters.

use regex::Regex;

use super::normalize::squash;

/// Build a case-insensitive pattern for `token` that allows non-word
/// characters between its letters and digits.
///
/// Returns `None` when the token has no letters or digits: such a
/// pattern would be empty and match everywhere.
pub fn fuzzy_pattern(token: &str) -> Option<Regex> {
    let parts: Vec<String> = token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .map(|c| regex::escape(&c.to_string()))
        .collect();

    if parts.is_empty() {
        return None;
    }

    // Only literal escapes joined by `\W*`, so this always compiles.
    Regex::new(&format!("(?i){}", parts.join(r"\W*"))).ok()
}

/// One token prepared for matching.
#[derive(Debug, Clone)]
struct PreparedToken {
    literal: String,
    squashed: String,
    fuzzy: Regex,
}

/// A fixed set of tokens with their fuzzy patterns compiled up front.
///
/// Rule tables build these once; `contains_any` builds a throwaway one.
#[derive(Debug, Clone)]
pub struct TokenSet {
    tokens: Vec<PreparedToken>,
}

impl TokenSet {
    /// Prepare a token set. Tokens without any letter or digit are dropped.
    pub fn new(tokens: &[&str]) -> Self {
        let tokens = tokens
            .iter()
            .filter_map(|token| {
                let fuzzy = fuzzy_pattern(token)?;
                Some(PreparedToken {
                    literal: token.to_lowercase(),
                    squashed: squash(token),
                    fuzzy,
                })
            })
            .collect();
        Self { tokens }
    }

    /// True if any token in the set is present in `haystack`.
    pub fn matches(&self, haystack: &str) -> bool {
        self.first_match(haystack).is_some()
    }

    /// The first token (lower-cased) found in `haystack`, if any.
    pub fn first_match(&self, haystack: &str) -> Option<&str> {
        let low = haystack.to_lowercase();
        let flat = squash(haystack);

        self.tokens
            .iter()
            .find(|t| {
                low.contains(&t.literal)
                    // a token like "location:" squashes to letters only
                    || (!t.squashed.is_empty() && flat.contains(&t.squashed))
                    || t.fuzzy.is_match(&low)
            })
            .map(|t| t.literal.as_str())
    }
}

/// True if any of `tokens` is present in `haystack`.
pub fn contains_any(haystack: &str, tokens: &[&str]) -> bool {
    TokenSet::new(tokens).matches(haystack)
}
