//! Problem statement data model
//!
//! A statement is a handful of free-form Markdown fields plus an ordered list
//! of examples. The JSON shape matches the judge backend's description
//! payload: empty values are `null`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::StatementError;
use crate::importer::Diagnostics;

/// Top-level statement fields, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Description,
    Input,
    Output,
    Examples,
    DataRange,
}

impl Field {
    /// Every field in the order it must appear in a document
    pub const ALL: [Field; 5] = [
        Field::Description,
        Field::Input,
        Field::Output,
        Field::Examples,
        Field::DataRange,
    ];

    /// Position in the canonical order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Heading text used for this field in Markdown documents
    pub fn label(self) -> &'static str {
        match self {
            Field::Description => "题目描述",
            Field::Input => "输入格式",
            Field::Output => "输出格式",
            Field::Examples => "样例",
            Field::DataRange => "数据范围",
        }
    }

    /// Key used in the JSON payload
    pub fn key(self) -> &'static str {
        match self {
            Field::Description => "description",
            Field::Input => "input",
            Field::Output => "output",
            Field::Examples => "examples",
            Field::DataRange => "data_range",
        }
    }

    pub fn from_label(label: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.label() == label)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Sub-heading of an example's input block
pub const EXAMPLE_INPUT_LABEL: &str = "输入";
/// Sub-heading of an example's output block
pub const EXAMPLE_OUTPUT_LABEL: &str = "输出";
/// Written in place of an empty input or output block
pub const EMPTY_PLACEHOLDER: &str = "（无）";
/// Shown in reports for an example without a name
pub const UNNAMED_EXAMPLE: &str = "（无名）";

/// One input/output demonstration attached to a problem
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    /// Free-form Markdown shown below the input and output
    #[serde(default)]
    pub description: Option<String>,
}

impl Example {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_EXAMPLE)
    }

    fn normalize(&mut self) {
        for value in [
            &mut self.name,
            &mut self.input,
            &mut self.output,
            &mut self.description,
        ] {
            normalize_value(value);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemStatement {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub data_range: Option<String>,
}

impl ProblemStatement {
    /// Read a statement from the backend JSON payload.
    ///
    /// Empty strings are treated as missing values, the same way the backend
    /// stores them.
    pub fn from_json(json: &str) -> Result<Self, StatementError> {
        let mut statement: ProblemStatement = serde_json::from_str(json)?;
        statement.normalize();
        Ok(statement)
    }

    pub fn to_json(&self) -> Result<String, StatementError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Text content of a top-level field; `None` for [`Field::Examples`]
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Description => self.description.as_deref(),
            Field::Input => self.input.as_deref(),
            Field::Output => self.output.as_deref(),
            Field::DataRange => self.data_range.as_deref(),
            Field::Examples => None,
        }
    }

    /// Replace a text field. Setting [`Field::Examples`] is a no-op.
    pub fn set_text(&mut self, field: Field, value: Option<String>) {
        let slot = match field {
            Field::Description => &mut self.description,
            Field::Input => &mut self.input,
            Field::Output => &mut self.output,
            Field::DataRange => &mut self.data_range,
            Field::Examples => return,
        };
        *slot = value;
    }

    pub fn normalize(&mut self) {
        for field in Field::ALL {
            let mut value = self.text(field).map(str::to_string);
            normalize_value(&mut value);
            self.set_text(field, value);
        }
        for example in &mut self.examples {
            example.normalize();
        }
    }

    /// Name every unnamed example `样例 N`, as the editor does once a second
    /// example is added.
    pub fn auto_name_examples(&mut self) {
        if self.examples.len() < 2 {
            return;
        }
        for (i, example) in self.examples.iter_mut().enumerate() {
            if example.name.is_none() {
                example.name = Some(format!("样例 {}", i + 1));
            }
        }
    }

    /// Problems that would make an exported document ambiguous to import.
    ///
    /// Only warnings are produced; exporting never fails.
    pub fn check_export(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        if self.examples.len() > 1 {
            let unnamed = self.examples.iter().filter(|e| e.name.is_none()).count();
            if unnamed > 0 {
                diagnostics.warning(format!(
                    "{} of {} examples have no name",
                    unnamed,
                    self.examples.len()
                ));
            }
        }

        // Without a name or blocks an example exports as bare text, which
        // reads back as the tail of the previous example.
        let blank = |v: &Option<String>| v.as_deref().map_or(true, str::is_empty);
        for (i, example) in self.examples.iter().enumerate() {
            if !blank(&example.name) || !blank(&example.input) || !blank(&example.output) {
                continue;
            }
            if blank(&example.description) {
                diagnostics.warning(format!("example {} is empty and is not exported", i + 1));
            } else if i > 0 {
                diagnostics.warning(format!(
                    "example {} has neither a name nor input/output, \
                     its description is imported as part of example {}",
                    i + 1,
                    i
                ));
            }
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for name in self.examples.iter().filter_map(|e| e.name.as_deref()) {
            *seen.entry(name).or_insert(0) += 1;
        }
        for example in &self.examples {
            let Some(name) = example.name.as_deref() else {
                continue;
            };
            if let Some(count) = seen.remove(name) {
                if count > 1 {
                    diagnostics.warning(format!(
                        "example name '{}' is used {} times",
                        name, count
                    ));
                }
            }
        }
        diagnostics
    }
}

fn normalize_value(value: &mut Option<String>) {
    if value.as_deref().is_some_and(str::is_empty) {
        *value = None;
    }
}
