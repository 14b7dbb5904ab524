//! Text normalization and tokenization.

use regex::Regex;
use std::sync::OnceLock;

// Regex patterns (cached for performance)
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
static NON_WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

fn whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn non_word_regex() -> &'static Regex {
    NON_WORD_REGEX
        .get_or_init(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("non-word pattern is valid"))
}

/// Remove markup tags, leaving the text between them in place.
pub fn strip_markup(text: &str) -> String {
    tag_regex().replace_all(text, "").into_owned()
}

/// Length in characters of the text once markup is removed and the ends trimmed.
pub fn plain_text_length(text: &str) -> usize {
    strip_markup(text).trim().chars().count()
}

/// Normalize text for scoring.
///
/// Strips markup, collapses whitespace runs to a single space, drops every
/// character that is not a Unicode letter, digit or space, then lowercases
/// and trims.
pub fn normalize(text: &str) -> String {
    let stripped = strip_markup(text);
    let collapsed = whitespace_regex().replace_all(&stripped, " ");
    let cleaned = non_word_regex().replace_all(&collapsed, "");
    cleaned.to_lowercase().trim().to_string()
}

/// Split normalized text into tokens.
///
/// Splits on single spaces and discards empty and single-character tokens.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized
        .split(' ')
        .filter(|token| token.chars().count() > 1)
        .collect()
}
