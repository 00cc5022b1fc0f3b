//! Token estimation.
//!
//! No real tokenizer is involved: one token is counted per
//! [`CHARS_PER_TOKEN`] characters, rounded up. Splitting a text anywhere
//! loses at most one token of accuracy, so summing part estimates never
//! undercounts the assembled text.

use crate::constants::CHARS_PER_TOKEN;

/// Estimate the token cost of `text`.
#[inline]
pub fn count(text: &str) -> usize {
    count_chars(text.chars().count())
}

/// Estimate the token cost of a text that is `chars` characters long.
#[inline]
pub fn count_chars(chars: usize) -> usize {
    chars.div_ceil(CHARS_PER_TOKEN)
}
