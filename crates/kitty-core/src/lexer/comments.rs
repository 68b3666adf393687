//! Comment markers recognised while scanning a line

pub(crate) const MULTILINE_COMMENT_START: &str = "/*";
pub(crate) const MULTILINE_COMMENT_END: &str = "*/";
const SINGLE_LINE_COMMENT: &str = "//";

/// Text that follows the first `*/`, if the comment terminates in `text`
pub(crate) fn after_multiline_comment_end(text: &str) -> Option<&str> {
    text.find(MULTILINE_COMMENT_END)
        .map(|index| &text[index + MULTILINE_COMMENT_END.len()..])
}

/// Text that follows a leading `/*`
pub(crate) fn after_multiline_comment_start(slice: &str) -> Option<&str> {
    slice.strip_prefix(MULTILINE_COMMENT_START)
}

pub(crate) fn is_single_line_comment(slice: &str) -> bool {
    slice.starts_with(SINGLE_LINE_COMMENT)
}

/// Byte offset of a `//` comment marker, if any
pub(crate) fn single_line_comment_start(line: &str) -> Option<usize> {
    line.find(SINGLE_LINE_COMMENT)
}
