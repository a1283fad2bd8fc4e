//! Page text tokenization
//!
//! This module turns raw page text into the normalized token stream and
//! frequency map that the fingerprint engine and statistics aggregator
//! consume.

mod stopwords;
mod tokenizer;

pub use stopwords::is_stop_word;
pub use tokenizer::{compute_frequencies, tokenize, TokenFrequency, Tokens, MIN_TOKEN_LEN};
