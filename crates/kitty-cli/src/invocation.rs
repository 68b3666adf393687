//! One editor command applied to one buffer

use std::collections::BTreeMap;

use kitty_core::{AccessChange, Rewriter};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    command::access_change,
    error::AccessControlError,
    selection::{selected_lines, TextRange},
    HostConfig,
};

/// What the editor hands over when a command is chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub command_identifier: String,
    pub content_type: String,
    pub lines: Vec<String>,
    pub selections: Vec<TextRange>,
}

impl Invocation {
    /// An invocation over `source`, split into lines
    pub fn new(
        command_identifier: impl Into<String>,
        content_type: impl Into<String>,
        source: &str,
        selections: Vec<TextRange>,
    ) -> Self {
        Self {
            command_identifier: command_identifier.into(),
            content_type: content_type.into(),
            lines: source.lines().map(str::to_string).collect(),
            selections,
        }
    }

    /// A selection spanning every line of the buffer
    pub fn whole_buffer(&self) -> Vec<TextRange> {
        match self.lines.len() {
            0 => Vec::new(),
            n => vec![TextRange::whole_lines(0, n - 1)],
        }
    }
}

/// Result of a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// `None` when the command identifier was not recognised
    pub change: Option<AccessChange>,
    /// Replacement text for every eligible selected line
    pub new_lines: BTreeMap<usize, String>,
    /// Lines whose text actually changed
    pub changed: Vec<usize>,
    /// The whole buffer after the edit
    pub lines: Vec<String>,
}

impl Outcome {
    fn unchanged(lines: Vec<String>) -> Self {
        Self {
            change: None,
            new_lines: BTreeMap::new(),
            changed: Vec::new(),
            lines,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }

    /// The buffer joined with `\n`, ending in a newline when `trailing_newline`
    pub fn text(&self, trailing_newline: bool) -> String {
        let mut text = self.lines.join("\n");
        if trailing_newline && !self.lines.is_empty() {
            text.push('\n');
        }
        text
    }
}

/// Runs one command over one buffer.
///
/// Unsupported content and an empty selection are errors. An unknown
/// command is not: it yields an outcome with no edits.
pub fn perform(config: &HostConfig, invocation: Invocation) -> Result<Outcome, AccessControlError> {
    if !config.supports(&invocation.content_type) {
        return Err(AccessControlError::UnsupportedContentType(invocation.content_type));
    }

    let line_numbers = selected_lines(&invocation.selections);
    if line_numbers.is_empty() {
        return Err(AccessControlError::NoSelection);
    }

    let Some(change) = access_change(&invocation.command_identifier, &config.bundle_prefix) else {
        warn!(identifier = %invocation.command_identifier, "unknown command, nothing to do");
        return Ok(Outcome::unchanged(invocation.lines));
    };

    debug!(%change, selected = line_numbers.len(), total = invocation.lines.len(), "performing command");

    let rewriter = Rewriter::new(invocation.lines);
    let new_lines = rewriter.new_lines(line_numbers.iter().copied(), change);
    let changed = rewriter.changed_lines(&new_lines);

    let mut lines = rewriter.lines().to_vec();
    for &line_number in &changed {
        if let Some(text) = new_lines.get(&line_number) {
            lines[line_number] = text.clone();
        }
    }

    info!(%change, changed = changed.len(), "command complete");

    Ok(Outcome {
        change: Some(change),
        new_lines,
        changed,
        lines,
    })
}
