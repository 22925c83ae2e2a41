//! Markdown to problem statement importer
//!
//! Parses a document in the exporter's heading convention back into a
//! [`ProblemStatement`](crate::statement::ProblemStatement). Hand-edited
//! documents are tolerated; every deviation is reported as a diagnostic
//! instead of aborting the parse:
//! - Info: a field or example was recognized
//! - Warning: the document bends the convention, data is still imported
//! - Error: the structure is contradictory, nothing is imported

mod examples;
mod options;
mod parser;
mod report;

use std::sync::LazyLock;

use regex::Regex;

pub use options::ImportOptions;
pub use parser::{ImportResult, MarkdownImporter};
pub use report::{Diagnostic, Diagnostics, ImportReport, Outcome, Severity};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})(?:[ \t]+(.*?))?[ \t]*$").unwrap());

/// A line of the source document with its 1-indexed line number
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl SourceLine<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// ATX heading level and text, e.g. `("## 样例")` gives `(2, "样例")`
pub(crate) fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let captures = HEADING.captures(line)?;
    let level = captures.get(1)?.as_str().len();
    let text = captures.get(2).map_or("", |m| m.as_str());
    Some((level, text))
}

/// Length of the backtick run if `line` opens a code fence.
///
/// The info string after the run may not contain a backtick, so a line
/// like ```` ```x``` y ```` is inline code rather than a fence.
pub(crate) fn fence_open(line: &str) -> Option<usize> {
    let line = line.trim_start();
    let run = line.chars().take_while(|&c| c == '`').count();
    (run >= 3 && !line[run..].contains('`')).then_some(run)
}

/// Whether `line` closes a fence opened with `open` backticks
pub(crate) fn fence_closes(line: &str, open: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= open && trimmed.chars().all(|c| c == '`')
}

/// Join lines back together and trim, `None` when nothing is left
pub(crate) fn join_trimmed<'a>(lines: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let text = lines.into_iter().collect::<Vec<_>>().join("\n");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
