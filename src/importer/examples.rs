//! Example section sub-parser
//!
//! Splits the body of the `## 样例` field into examples:
//!
//! ~~~text
//! ### name            starts a named example
//! #### 输入           input block (### 输入 while no example is named)
//! ```                 fenced content, or a placeholder such as （无）
//! #### 输出           output block
//! free text           example description
//! ~~~

use std::sync::LazyLock;

use regex::Regex;

use super::report::Diagnostics;
use super::{fence_closes, fence_open, join_trimmed, parse_heading, SourceLine};
use crate::statement::{Example, EXAMPLE_INPUT_LABEL, EXAMPLE_OUTPUT_LABEL};

static EMPTY_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[(（]?(无|none|no|null|empty)[)）]?$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Input,
    Output,
}

impl Slot {
    fn from_label(label: &str) -> Option<Slot> {
        match label {
            EXAMPLE_INPUT_LABEL => Some(Slot::Input),
            EXAMPLE_OUTPUT_LABEL => Some(Slot::Output),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Slot::Input => EXAMPLE_INPUT_LABEL,
            Slot::Output => EXAMPLE_OUTPUT_LABEL,
        }
    }
}

enum ExampleState<'a> {
    /// Before the first example
    Outside,
    /// After `### name`, before anything else
    AfterHeader,
    /// After an input/output heading, waiting for a fence or placeholder
    AwaitingBlock { slot: Slot, line: usize },
    InBlock {
        slot: Slot,
        line: usize,
        open: usize,
        buffer: Vec<&'a str>,
    },
    /// Free text after the blocks; `fence` is the code fence open in it
    InDescription {
        buffer: Vec<&'a str>,
        fence: Option<usize>,
    },
}

/// An example whose parts are still being collected
struct PendingExample {
    name: Option<String>,
    line: usize,
    input: Option<String>,
    output: Option<String>,
    seen_input: bool,
    seen_output: bool,
    description: Option<String>,
}

impl PendingExample {
    fn new(name: Option<String>, line: usize) -> Self {
        Self {
            name,
            line,
            input: None,
            output: None,
            seen_input: false,
            seen_output: false,
            description: None,
        }
    }

    fn seen(&self, slot: Slot) -> bool {
        match slot {
            Slot::Input => self.seen_input,
            Slot::Output => self.seen_output,
        }
    }

    fn mark_seen(&mut self, slot: Slot) {
        match slot {
            Slot::Input => self.seen_input = true,
            Slot::Output => self.seen_output = true,
        }
    }

    fn set(&mut self, slot: Slot, value: Option<String>) {
        match slot {
            Slot::Input => self.input = value,
            Slot::Output => self.output = value,
        }
    }

    fn append_description(&mut self, text: String) {
        self.description = Some(match self.description.take() {
            Some(existing) => format!("{}\n\n{}", existing, text),
            None => text,
        });
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(crate::statement::UNNAMED_EXAMPLE)
    }
}

struct ExampleParser<'a, 'd> {
    state: ExampleState<'a>,
    current: Option<PendingExample>,
    /// Whether any `### name` heading has been seen
    named_seen: bool,
    examples: Vec<Example>,
    diagnostics: &'d mut Diagnostics,
}

/// Parse the body lines of the examples field, appending diagnostics
pub(crate) fn parse_examples(lines: &[SourceLine<'_>], diagnostics: &mut Diagnostics) -> Vec<Example> {
    let mut parser = ExampleParser {
        state: ExampleState::Outside,
        current: None,
        named_seen: false,
        examples: Vec::new(),
        diagnostics,
    };
    for line in lines {
        parser.feed(*line);
    }
    parser.finish()
}

impl<'a> ExampleParser<'a, '_> {
    fn feed(&mut self, line: SourceLine<'a>) {
        match &mut self.state {
            // Headings inside a fenced description block are content.
            ExampleState::InDescription { buffer, fence } if fence.is_some() => {
                if fence.is_some_and(|open| fence_closes(line.text, open)) {
                    *fence = None;
                }
                buffer.push(line.text);
            }
            ExampleState::InBlock {
                slot, open, buffer, ..
            } => {
                if fence_closes(line.text, *open) {
                    let slot = *slot;
                    let value = buffer.join("\n");
                    self.set_current(slot, (!value.is_empty()).then_some(value));
                    self.state = ExampleState::InDescription {
                        buffer: Vec::new(),
                        fence: None,
                    };
                } else {
                    buffer.push(line.text);
                }
            }
            ExampleState::AwaitingBlock { slot, .. } => {
                let slot = *slot;
                if line.is_blank() {
                    return;
                }
                if let Some(open) = fence_open(line.text) {
                    self.state = ExampleState::InBlock {
                        slot,
                        line: line.number,
                        open,
                        buffer: Vec::new(),
                    };
                } else if EMPTY_PLACEHOLDER.is_match(line.text.trim()) {
                    self.set_current(slot, None);
                    self.state = ExampleState::InDescription {
                        buffer: Vec::new(),
                        fence: None,
                    };
                } else {
                    self.diagnostics.error_at(
                        line.number,
                        format!(
                            "garbage line before {} block: '{}'",
                            slot.label(),
                            line.text.trim()
                        ),
                    );
                    self.state = ExampleState::InDescription {
                        buffer: Vec::new(),
                        fence: None,
                    };
                }
            }
            ExampleState::Outside
            | ExampleState::AfterHeader
            | ExampleState::InDescription { .. } => self.structural_line(line),
        }
    }

    fn structural_line(&mut self, line: SourceLine<'a>) {
        match parse_heading(line.text) {
            Some((level @ (3 | 4), text)) => match Slot::from_label(text) {
                Some(slot) => self.open_slot(slot, level, line),
                None if level == 3 => self.start_example(Some(text), line),
                None => self.description_line(line),
            },
            _ => self.description_line(line),
        }
    }

    fn description_line(&mut self, line: SourceLine<'a>) {
        match &mut self.state {
            ExampleState::InDescription { buffer, fence } => {
                *fence = fence_open(line.text);
                buffer.push(line.text);
            }
            ExampleState::AfterHeader => {
                if !line.is_blank() {
                    self.state = ExampleState::InDescription {
                        buffer: vec![line.text],
                        fence: fence_open(line.text),
                    };
                }
            }
            ExampleState::Outside => {
                if line.is_blank() {
                    return;
                }
                self.diagnostics.warning_at(
                    line.number,
                    "text before the first example heading, treated as an unnamed example",
                );
                self.current = Some(PendingExample::new(None, line.number));
                self.state = ExampleState::InDescription {
                    buffer: vec![line.text],
                    fence: fence_open(line.text),
                };
            }
            ExampleState::AwaitingBlock { .. } | ExampleState::InBlock { .. } => {}
        }
    }

    fn start_example(&mut self, name: Option<&str>, line: SourceLine<'a>) {
        self.flush_state();
        self.finish_example();
        let name = name.filter(|n| !n.is_empty()).map(str::to_string);
        if name.is_some() {
            self.named_seen = true;
        }
        self.current = Some(PendingExample::new(name, line.number));
        self.state = ExampleState::AfterHeader;
    }

    fn open_slot(&mut self, slot: Slot, level: usize, line: SourceLine<'a>) {
        if level == 3 && self.named_seen {
            self.diagnostics.warning_at(
                line.number,
                format!(
                    "wrong heading level for '{}', expected '#### {}'",
                    slot.label(),
                    slot.label()
                ),
            );
        }

        self.flush_state();
        let start_new = match &self.current {
            None => true,
            Some(example) if example.name.is_some() => {
                if example.seen(slot) {
                    self.diagnostics.error_at(
                        line.number,
                        format!(
                            "duplicate {} in example '{}'",
                            slot.label(),
                            example.display_name()
                        ),
                    );
                }
                false
            }
            // Unnamed examples are told apart only by their blocks repeating.
            Some(example) => {
                example.seen(slot) || (slot == Slot::Input && example.seen_output)
            }
        };
        if start_new {
            self.finish_example();
            self.current = Some(PendingExample::new(None, line.number));
        }
        if let Some(example) = self.current.as_mut() {
            example.mark_seen(slot);
        }
        self.state = ExampleState::AwaitingBlock {
            slot,
            line: line.number,
        };
    }

    fn set_current(&mut self, slot: Slot, value: Option<String>) {
        if let Some(example) = self.current.as_mut() {
            example.set(slot, value);
        }
    }

    /// Leave the current state, keeping whatever it collected
    fn flush_state(&mut self) {
        match std::mem::replace(&mut self.state, ExampleState::Outside) {
            ExampleState::InDescription { buffer, fence } => {
                if let Some(example) = self.current.as_mut() {
                    if fence.is_some() {
                        self.diagnostics.warning_at(
                            example.line,
                            format!(
                                "unterminated code block in description of example '{}'",
                                example.display_name()
                            ),
                        );
                    }
                    if let Some(text) = join_trimmed(buffer) {
                        example.append_description(text);
                    }
                }
            }
            ExampleState::InBlock { slot, line, .. } => {
                self.diagnostics.error_at(
                    line,
                    format!("unterminated code block in {} block", slot.label()),
                );
            }
            ExampleState::AwaitingBlock { slot, line } => {
                self.diagnostics.error_at(
                    line,
                    format!("missing code block after '{}' heading", slot.label()),
                );
            }
            ExampleState::Outside | ExampleState::AfterHeader => {}
        }
    }

    fn finish_example(&mut self) {
        let Some(pending) = self.current.take() else {
            return;
        };
        if pending.input.is_none() && pending.output.is_none() {
            self.diagnostics.warning_at(
                pending.line,
                format!(
                    "example '{}' has neither input nor output",
                    pending.display_name()
                ),
            );
        }
        self.diagnostics.info_at(
            pending.line,
            format!("recognized example '{}'", pending.display_name()),
        );
        self.examples.push(Example {
            name: pending.name,
            input: pending.input,
            output: pending.output,
            description: pending.description,
        });
    }

    fn finish(mut self) -> Vec<Example> {
        self.flush_state();
        self.finish_example();

        let unnamed = self.examples.iter().filter(|e| e.name.is_none()).count();
        if self.examples.len() > 1 && unnamed > 0 {
            self.diagnostics.warning(format!(
                "{} of {} examples have no name",
                unnamed,
                self.examples.len()
            ));
        }
        log::debug!("Parsed {} example(s)", self.examples.len());
        self.examples
    }
}
