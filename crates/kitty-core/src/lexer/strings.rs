//! String literal elision
//!
//! String contents must never be mistaken for keywords, so literals are cut
//! out of the line before it is split into words.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

use super::comments::single_line_comment_start;

const TRIPLE_QUOTE: &str = "\"\"\"";

static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*""#).expect("string literal pattern is valid")
});

/// Removes every paired `"..."` span; an unpaired quote is left in place
pub(crate) fn strip_string_literals(line: &str) -> Cow<'_, str> {
    STRING_LITERAL.replace_all(line, "")
}

/// Byte offset of a `"""` that opens a multiline string on this line.
///
/// Only a trailing opener counts: `"""` with code after it on the same line
/// is treated as ordinary quotes.
pub(crate) fn multiline_string_opener(line: &str) -> Option<usize> {
    let start = line.find(TRIPLE_QUOTE)?;
    if single_line_comment_start(line).is_some_and(|comment| comment < start) {
        return None;
    }
    line[start + TRIPLE_QUOTE.len()..]
        .trim()
        .is_empty()
        .then_some(start)
}

/// Text after the `"""` that closes a multiline string
pub(crate) fn after_multiline_string_end(line: &str) -> Option<&str> {
    line.find(TRIPLE_QUOTE)
        .map(|index| &line[index + TRIPLE_QUOTE.len()..])
}
