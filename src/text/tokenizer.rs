//! Tokenizer for page text
//!
//! Tokens are maximal ASCII alphanumeric runs, lowercased; anything else
//! (punctuation, whitespace, non-ASCII letters) separates tokens. Runs
//! shorter than [`MIN_TOKEN_LEN`] and stop words are discarded.

use crate::text::stopwords::is_stop_word;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Minimum token length kept by the tokenizer
pub const MIN_TOKEN_LEN: usize = 3;

/// Token-to-count map for a single page
pub type TokenFrequency = HashMap<String, u64>;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9]+").expect("token pattern is valid"));

/// Lazy iterator over the kept tokens of a text
///
/// Yields tokens in first-occurrence order with duplicates retained. The
/// iterator borrows the input, so `tokenize` can be called again on the same
/// text for a second pass.
pub struct Tokens<'a> {
    matches: regex::Matches<'static, 'a>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for m in self.matches.by_ref() {
            // Alphanumeric runs are ASCII, so byte length == char length
            if m.as_str().len() < MIN_TOKEN_LEN {
                continue;
            }
            let token = m.as_str().to_lowercase();
            if is_stop_word(&token) {
                continue;
            }
            return Some(token);
        }
        None
    }
}

/// Tokenizes a text into lowercase alphanumeric tokens
///
/// # Arguments
///
/// * `text` - The raw page text
///
/// # Returns
///
/// A lazy iterator over the kept tokens
///
/// # Examples
///
/// ```
/// use kumo_weave::text::tokenize;
///
/// let tokens: Vec<String> = tokenize("Hello, World! the 123").collect();
/// assert_eq!(tokens, vec!["hello", "world", "123"]);
/// ```
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens {
        matches: TOKEN_PATTERN.find_iter(text),
    }
}

/// Counts token occurrences into a frequency map
///
/// O(n) in the number of tokens.
pub fn compute_frequencies(tokens: impl IntoIterator<Item = String>) -> TokenFrequency {
    let mut frequencies = TokenFrequency::new();
    for token in tokens {
        *frequencies.entry(token).or_insert(0) += 1;
    }
    frequencies
}
