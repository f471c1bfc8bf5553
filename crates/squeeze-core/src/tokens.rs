//! Token estimation utilities

/// Contexts shorter than this (in characters) are passed through untouched
pub const MIN_COMPRESS_CHARS: usize = 100;

/// Length in Unicode scalar values, not bytes
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Estimate token count with the flat ~4 chars/token heuristic
///
/// Floors the result, so anything under four characters counts as zero
/// tokens. This does not track any real tokenizer and is only used on the
/// bypass path.
pub fn estimate_tokens(text: &str) -> usize {
    char_len(text) / 4
}

pub fn is_below_threshold(text: &str, min_chars: usize) -> bool {
    char_len(text) < min_chars
}
