//! Editor selections to line numbers
//!
//! An editor reports selections as ranges of zero-based `line:column`
//! positions. A range selects every line it spans except:
//! - a zero-width range (a bare caret) selects nothing
//! - a range ending at column 0 of a later line leaves that line out, since
//!   selecting whole lines ends at the start of the next one

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

impl TextPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl TextRange {
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }

    /// A selection of the whole lines `first..=last`
    pub fn whole_lines(first: usize, last: usize) -> Self {
        Self::new(TextPosition::new(first, 0), TextPosition::new(last + 1, 0))
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selection {0:?}: expected LINE:COLUMN-LINE:COLUMN or FIRST-LAST")]
pub struct ParseSelectionError(pub String);

impl FromStr for TextPosition {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSelectionError(s.to_string());
        let (line, column) = s.split_once(':').ok_or_else(invalid)?;
        Ok(Self::new(
            line.trim().parse().map_err(|_| invalid())?,
            column.trim().parse().map_err(|_| invalid())?,
        ))
    }
}

impl FromStr for TextRange {
    type Err = ParseSelectionError;

    /// `12:0-14:8` for an editor range
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| ParseSelectionError(s.to_string()))?;
        let range = Self::new(start.parse()?, end.parse()?);
        if range.end < range.start {
            return Err(ParseSelectionError(s.to_string()));
        }
        Ok(range)
    }
}

/// Parses `FIRST-LAST` or a single `LINE` into a whole-line selection
pub fn parse_line_range(s: &str) -> Result<TextRange, ParseSelectionError> {
    let invalid = || ParseSelectionError(s.to_string());
    let (first, last) = match s.split_once('-') {
        Some((first, last)) => (first, last),
        None => (s, s),
    };
    let first: usize = first.trim().parse().map_err(|_| invalid())?;
    let last: usize = last.trim().parse().map_err(|_| invalid())?;
    if last < first {
        return Err(invalid());
    }
    Ok(TextRange::whole_lines(first, last))
}

/// Line numbers touched by one selection range
pub fn lines(range: &TextRange) -> Vec<usize> {
    if range.is_empty() {
        return Vec::new();
    }
    let last = if range.end.column == 0 && range.end.line > range.start.line {
        range.end.line - 1
    } else {
        range.end.line
    };
    (range.start.line..=last).collect()
}

/// Sorted, de-duplicated line numbers touched by any of `ranges`
pub fn selected_lines<'a, I>(ranges: I) -> Vec<usize>
where
    I: IntoIterator<Item = &'a TextRange>,
{
    ranges
        .into_iter()
        .flat_map(lines)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
