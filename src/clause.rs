//! Stateless lexical helpers shared by the statement handlers.

use crate::error::{DbError, DbResult};

/// Returns the substring strictly between the first `(` and the first `)`
/// that follows it.
///
/// Nested parentheses are not understood, and parentheses inside quoted text
/// literals are not protected; a text value containing `(` or `)` will
/// confuse the extraction.
///
/// # Errors
/// Returns an error if either bracket is absent.
pub fn extract_bracketed(text: &str) -> DbResult<&str> {
    let open = text
        .find('(')
        .ok_or_else(|| DbError::Syntax(format!("missing '(' in {:?}", text.trim())))?;
    let close = text[open..]
        .find(')')
        .map(|offset| open + offset)
        .ok_or_else(|| DbError::Syntax(format!("missing ')' in {:?}", text.trim())))?;
    Ok(&text[open + 1..close])
}

/// Splits a comma-separated list, trimming surrounding whitespace from each
/// item and discarding empty items.
///
/// Commas inside quoted text literals are not protected; the caller accepts
/// that limitation.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Finds the byte offset of the first case-insensitive occurrence of
/// `keyword` in `text`.
///
/// The scan compares raw byte windows, so the returned offset is always a
/// valid index into `text` for ASCII keywords.
pub fn find_keyword(text: &str, keyword: &str) -> Option<usize> {
    let haystack = text.as_bytes();
    let needle = keyword.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}
