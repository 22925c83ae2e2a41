//! Top-level field parser

use std::time::Instant;

use super::examples::parse_examples;
use super::options::ImportOptions;
use super::report::{Diagnostics, Outcome};
use super::{fence_closes, fence_open, join_trimmed, parse_heading, SourceLine};
use crate::statement::{Field, ProblemStatement};

/// Result of markdown import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    /// Parsed statement, `None` when an error was reported
    pub statement: Option<ProblemStatement>,
    /// Fields present in the document, in document order. Fields not listed
    /// here were absent and must be left untouched by the caller.
    pub fields: Vec<Field>,
    pub diagnostics: Diagnostics,
}

impl ImportResult {
    pub fn outcome(&self) -> Outcome {
        self.diagnostics.outcome()
    }
}

/// Markdown to problem statement importer
pub struct MarkdownImporter {
    options: ImportOptions,
}

impl MarkdownImporter {
    /// Create a new importer with the given options
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Parse a markdown document.
    ///
    /// This never fails: problems are collected in the returned diagnostics,
    /// and any error leaves `statement` empty.
    pub fn import(&self, markdown: &str) -> ImportResult {
        let start_time = Instant::now();
        let text = markdown.replace("\r\n", "\n").replace('\r', "\n");

        let mut run = ImportRun::new(&self.options);
        for (i, line) in text.lines().enumerate() {
            run.feed(SourceLine {
                number: i + 1,
                text: line,
            });
        }
        let result = run.finish();

        log::info!(
            "Imported {} field(s) in {}ms: {}",
            result.fields.len(),
            start_time.elapsed().as_millis(),
            result.outcome()
        );
        result
    }
}

enum TopState<'a> {
    /// Nothing but blank lines seen so far
    AwaitingFirstLine,
    /// Accumulating the body of a field
    InField {
        field: Field,
        line: usize,
        buffer: Vec<SourceLine<'a>>,
        /// Backtick count of the code fence currently open in the body
        fence: Option<usize>,
    },
    /// Outside any field; body lines are dropped
    Idle,
}

struct ImportRun<'a, 'o> {
    options: &'o ImportOptions,
    state: TopState<'a>,
    highest: Option<Field>,
    statement: ProblemStatement,
    fields: Vec<Field>,
    diagnostics: Diagnostics,
}

impl<'a, 'o> ImportRun<'a, 'o> {
    fn new(options: &'o ImportOptions) -> Self {
        Self {
            options,
            state: TopState::AwaitingFirstLine,
            highest: None,
            statement: ProblemStatement::default(),
            fields: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn feed(&mut self, line: SourceLine<'a>) {
        // Code blocks are opaque: no heading inside them is structural.
        if let TopState::InField { buffer, fence, .. } = &mut self.state {
            if let Some(open) = *fence {
                if fence_closes(line.text, open) {
                    *fence = None;
                }
                buffer.push(line);
                return;
            }
        }

        if matches!(self.state, TopState::AwaitingFirstLine) {
            if !line.is_blank() {
                self.first_line(line);
            }
            return;
        }

        match parse_heading(line.text) {
            Some((2, label)) => self.field_heading(line, label),
            _ => self.body_line(line),
        }
    }

    fn first_line(&mut self, line: SourceLine<'a>) {
        self.state = TopState::Idle;
        match parse_heading(line.text) {
            Some((1, title)) => match self.options.title.as_deref() {
                Some(expected) if expected != title => {
                    self.diagnostics.warning_at(
                        line.number,
                        format!(
                            "title '{}' does not match the problem title '{}'",
                            title, expected
                        ),
                    );
                }
                _ => self
                    .diagnostics
                    .info_at(line.number, format!("problem title '{}'", title)),
            },
            Some((2, label)) if Field::from_label(label).is_some() => {
                self.field_heading(line, label);
            }
            _ => self.diagnostics.error_at(
                line.number,
                "cannot parse first line, expected '# <title>' or a field heading",
            ),
        }
    }

    fn field_heading(&mut self, line: SourceLine<'a>, label: &str) {
        let Some(field) = Field::from_label(label) else {
            self.diagnostics
                .warning_at(line.number, format!("unrecognized heading '{}'", label));
            self.body_line(line);
            return;
        };

        if self.fields.contains(&field) {
            self.diagnostics
                .error_at(line.number, format!("duplicate field '{}'", field));
            self.close_field();
            return;
        }
        if let Some(highest) = self.highest {
            if field.index() <= highest.index() {
                self.diagnostics.error_at(
                    line.number,
                    format!("field '{}' is out of order, it must come before '{}'", field, highest),
                );
                self.close_field();
                return;
            }
        }

        self.close_field();
        self.highest = Some(field);
        self.state = TopState::InField {
            field,
            line: line.number,
            buffer: Vec::new(),
            fence: None,
        };
    }

    fn body_line(&mut self, line: SourceLine<'a>) {
        if let TopState::InField { buffer, fence, .. } = &mut self.state {
            *fence = fence_open(line.text);
            buffer.push(line);
        }
    }

    /// Store the open field, if any, and go idle
    fn close_field(&mut self) {
        let TopState::InField {
            field,
            line,
            buffer,
            fence,
        } = std::mem::replace(&mut self.state, TopState::Idle)
        else {
            return;
        };

        log::debug!("Closing field {} ({} lines)", field.key(), buffer.len());
        self.fields.push(field);
        self.diagnostics
            .info_at(line, format!("recognized field '{}'", field));

        if field == Field::Examples {
            self.statement.examples = parse_examples(&buffer, &mut self.diagnostics);
            return;
        }
        if fence.is_some() {
            self.diagnostics.warning_at(
                line,
                format!("unterminated code block in field '{}'", field),
            );
        }
        self.statement
            .set_text(field, join_trimmed(buffer.iter().map(|l| l.text)));
    }

    fn finish(mut self) -> ImportResult {
        self.close_field();
        if self.fields.is_empty() {
            self.diagnostics.error("file is empty");
        }

        if self.diagnostics.has_errors() {
            return ImportResult {
                statement: None,
                fields: Vec::new(),
                diagnostics: self.diagnostics,
            };
        }
        ImportResult {
            statement: Some(self.statement),
            fields: self.fields,
            diagnostics: self.diagnostics,
        }
    }
}
