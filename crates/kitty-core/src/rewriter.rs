//! Whole-buffer rewriting
//!
//! The scope stack is path dependent, so every line is lexed and classified
//! once, from the top of the buffer, before any selected line is edited.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace, warn};

use crate::{
    access::AccessChange,
    classifier::{classify, Classification},
    editor::{apply_edit, apply_setter_edit},
    lexer::analyse_lines,
    resolver::{resolve, resolve_setter},
    structure::Structure,
};

/// A classified source buffer, ready to produce edits for any selection
#[derive(Debug, Clone)]
pub struct Rewriter {
    lines: Vec<String>,
    classified: Vec<Classification>,
}

impl Rewriter {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let mut structure = Structure::new();
        let classified = analyse_lines(&lines)
            .iter()
            .map(|tokens| classify(tokens, &mut structure))
            .collect();

        Self { lines, classified }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn classification(&self, line_number: usize) -> Option<&Classification> {
        self.classified.get(line_number)
    }

    pub fn is_eligible(&self, line_number: usize) -> bool {
        self.classification(line_number).is_some_and(|c| c.eligible)
    }

    /// Replacement text for every eligible selected line.
    ///
    /// Eligible lines the change does not touch map to their original text;
    /// ineligible and out-of-range lines are absent.
    pub fn new_lines<I>(&self, line_numbers: I, change: AccessChange) -> BTreeMap<usize, String>
    where
        I: IntoIterator<Item = usize>,
    {
        let selected: BTreeSet<usize> = line_numbers.into_iter().collect();
        let mut new_lines = BTreeMap::new();

        for line_number in selected {
            let Some(classification) = self.classified.get(line_number) else {
                warn!(line_number, total = self.lines.len(), "selected line is out of range");
                continue;
            };
            if !classification.eligible {
                continue;
            }
            let line = &self.lines[line_number];
            let edited = rewrite_line(line, classification, change);
            trace!(line_number, from = %line, to = %edited, "rewrote line");
            new_lines.insert(line_number, edited);
        }

        debug!(
            %change,
            eligible = new_lines.len(),
            changed = self.changed_lines(&new_lines).len(),
            "computed new lines"
        );
        new_lines
    }

    /// Line numbers whose replacement differs from the original text
    pub fn changed_lines(&self, new_lines: &BTreeMap<usize, String>) -> Vec<usize> {
        new_lines
            .iter()
            .filter(|(line_number, text)| {
                self.lines
                    .get(**line_number)
                    .is_some_and(|original| original != *text)
            })
            .map(|(line_number, _)| *line_number)
            .collect()
    }

    /// The whole buffer with the edits for `line_numbers` applied
    pub fn rewritten<I>(&self, line_numbers: I, change: AccessChange) -> Vec<String>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut new_lines = self.new_lines(line_numbers, change);
        self.lines
            .iter()
            .enumerate()
            .map(|(line_number, line)| new_lines.remove(&line_number).unwrap_or_else(|| line.clone()))
            .collect()
    }
}

fn rewrite_line(line: &str, classification: &Classification, change: AccessChange) -> String {
    let Some(resolution) = resolve(change, classification.current) else {
        return line.to_string();
    };

    let edited = apply_edit(line, &classification.change, resolution.replacement);

    match classification.change.setter_access() {
        Some(setter) => {
            let setter_edit = resolve_setter(change, setter, resolution.target);
            apply_setter_edit(&edited, setter, setter_edit)
        }
        None => edited,
    }
}

/// Rewrites the selected lines of `lines` in one call
pub fn rewrite<S: AsRef<str>>(
    lines: &[S],
    line_numbers: &[usize],
    change: AccessChange,
) -> BTreeMap<usize, String> {
    Rewriter::new(lines.iter().map(|line| line.as_ref().to_string()))
        .new_lines(line_numbers.iter().copied(), change)
}
