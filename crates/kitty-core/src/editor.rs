//! Text edits on a single line
//!
//! Edits are positioned by anchor text rather than column, so a missing
//! anchor simply leaves the line as it was.

use crate::{access::Access, classifier::LineChange, resolver::SetterEdit};

const SETTER_SUFFIX: &str = "(set)";

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte range of the first whole-word occurrence of `anchor` in `line`.
///
/// An occurrence directly followed by `(set)` belongs to a setter annotation
/// and is skipped.
pub fn find_anchor(line: &str, anchor: &str) -> Option<(usize, usize)> {
    if anchor.is_empty() {
        return None;
    }
    let guard_start = anchor.starts_with(is_identifier_char);
    let guard_end = anchor.ends_with(is_identifier_char);

    line.match_indices(anchor).find_map(|(start, matched)| {
        let end = start + matched.len();
        let before = line[..start].chars().next_back();
        let after = &line[end..];

        if guard_start && before.is_some_and(is_identifier_char) {
            return None;
        }
        if guard_end && after.starts_with(is_identifier_char) {
            return None;
        }
        if after.starts_with(SETTER_SUFFIX) {
            return None;
        }
        Some((start, end))
    })
}

/// Applies the primary edit for `change` to `line`
pub fn apply_edit(line: &str, change: &LineChange, replacement: &str) -> String {
    let Some(anchor) = change.anchor() else {
        return line.to_string();
    };

    match change {
        LineChange::Substitute(_) | LineChange::SetterSubstitute(..) => {
            substitute(line, anchor, replacement)
        }
        LineChange::Postfix(_) | LineChange::SetterPostfix(..) if !replacement.is_empty() => {
            match find_anchor(line, anchor).and_then(|(_, end)| postfix_position(line, anchor, end)) {
                Some(end) => splice(line, end, end, &format!(" {replacement}")),
                None => line.to_string(),
            }
        }
        LineChange::Prefix(_) if !replacement.is_empty() => match find_anchor(line, anchor) {
            Some((start, _)) => splice(line, start, start, &format!("{replacement} ")),
            None => line.to_string(),
        },
        // Nothing to insert
        _ => line.to_string(),
    }
}

/// Where a postfix insert goes: after the anchor, or after the argument list
/// of an attribute such as `@objc(name)`. `None` when the arguments never
/// close on this line.
fn postfix_position(line: &str, anchor: &str, end: usize) -> Option<usize> {
    if !anchor.starts_with('@') || !line[end..].starts_with('(') {
        return Some(end);
    }
    let mut depth = 0usize;
    for (offset, c) in line[end..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(end + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

fn substitute(line: &str, anchor: &str, replacement: &str) -> String {
    match find_anchor(line, anchor) {
        Some((start, end)) if replacement.is_empty() => {
            // take the following space with the keyword
            if line[end..].starts_with(' ') {
                splice(line, start, end + 1, "")
            } else {
                line.to_string()
            }
        }
        Some((start, end)) => splice(line, start, end, replacement),
        None => line.to_string(),
    }
}

/// Applies the setter sub-edit to an already edited line
pub fn apply_setter_edit(line: &str, setter: Access, edit: SetterEdit) -> String {
    let Some(current) = setter.setter_spelling() else {
        return line.to_string();
    };
    let Some((start, end)) = find_anchor(line, current) else {
        return line.to_string();
    };

    match edit {
        SetterEdit::Keep => line.to_string(),
        SetterEdit::Remove => {
            let end = if line[end..].starts_with(' ') { end + 1 } else { end };
            splice(line, start, end, "")
        }
        SetterEdit::Replace(target) => match target.setter_spelling() {
            Some(spelling) => splice(line, start, end, spelling),
            None => line.to_string(),
        },
    }
}

fn splice(line: &str, start: usize, end: usize, insert: &str) -> String {
    let mut edited = String::with_capacity(line.len() + insert.len());
    edited.push_str(&line[..start]);
    edited.push_str(insert);
    edited.push_str(&line[end..]);
    edited
}
