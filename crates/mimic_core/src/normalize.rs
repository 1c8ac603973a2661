//! Message normalization: strip emoji, markup and other symbols, collapse whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::message::MessageText;

/// Anything that is not a letter, digit, underscore, whitespace or basic punctuation.
///
/// Letters and numbers are named explicitly: the regex crate's `\w` also matches
/// combining marks and ZWJ, which would leave emoji residue behind.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\s.,!?\-:;()]").expect("valid regex"));

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize a raw message body. Fragment lists are flattened first.
pub fn normalize(text: &MessageText) -> String {
    normalize_str(&text.flatten())
}

/// Normalize plain text.
///
/// Every character outside the whitelist becomes a space, whitespace runs collapse
/// to one space and the result is trimmed. The output is a fixed point:
/// `normalize_str(&normalize_str(x)) == normalize_str(x)`.
pub fn normalize_str(text: &str) -> String {
    let replaced = DISALLOWED.replace_all(text, " ");
    WHITESPACE_RUN.replace_all(&replaced, " ").trim().to_string()
}
