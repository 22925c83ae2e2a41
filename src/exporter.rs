use std::io;
use std::io::Write;

use crate::statement::{
    Example, Field, ProblemStatement, EMPTY_PLACEHOLDER, EXAMPLE_INPUT_LABEL,
    EXAMPLE_OUTPUT_LABEL,
};

/// Conventional name of an exported statement
pub const DEFAULT_EXPORT_FILE_NAME: &str = "description.md";

/// Writes a statement as a single Markdown document that
/// [`MarkdownImporter`](crate::importer::MarkdownImporter) reads back.
#[derive(Debug, Default)]
pub struct MarkdownExporter {}

impl MarkdownExporter {
    pub fn new() -> Self {
        MarkdownExporter {}
    }

    pub fn format(
        &self,
        title: &str,
        statement: &ProblemStatement,
        output: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(output, "# {}", title)?;
        for field in Field::ALL {
            if field == Field::Examples {
                if statement.examples.is_empty() {
                    continue;
                }
                write!(output, "\n## {}\n", field.label())?;
                for example in &statement.examples {
                    self.format_example(example, output)?;
                }
                continue;
            }

            let Some(text) = statement.text(field).filter(|t| !t.trim().is_empty()) else {
                continue;
            };
            write!(output, "\n## {}\n\n", field.label())?;
            write_block(text, output)?;
        }
        Ok(())
    }

    /// Render to a string
    pub fn to_markdown(&self, title: &str, statement: &ProblemStatement) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.format(title, statement, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn format_example(&self, example: &Example, output: &mut dyn Write) -> io::Result<()> {
        let sub_heading = match example.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => {
                write!(output, "\n### {}\n", name)?;
                "####"
            }
            None => "###",
        };

        let input = non_empty(example.input.as_deref());
        let output_text = non_empty(example.output.as_deref());
        if input.is_some() || output_text.is_some() {
            for (label, value) in [(EXAMPLE_INPUT_LABEL, input), (EXAMPLE_OUTPUT_LABEL, output_text)] {
                write!(output, "\n{} {}\n\n", sub_heading, label)?;
                match value {
                    Some(value) => {
                        let fence = "`".repeat(fence_len(value));
                        write!(output, "{}\n{}\n{}\n", fence, value, fence)?;
                    }
                    None => writeln!(output, "{}", EMPTY_PLACEHOLDER)?,
                }
            }
        }

        if let Some(description) = non_empty(example.description.as_deref()) {
            writeln!(output)?;
            write_block(description, output)?;
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Raw content followed by exactly one line break
fn write_block(text: &str, output: &mut dyn Write) -> io::Result<()> {
    write!(output, "{}", text)?;
    if !text.ends_with('\n') {
        writeln!(output)?;
    }
    Ok(())
}

/// Shortest fence that no line of `value` can close
fn fence_len(value: &str) -> usize {
    value
        .lines()
        .map(|line| line.trim_start().chars().take_while(|&c| c == '`').count())
        .max()
        .map_or(3, |longest| (longest + 1).max(3))
}
