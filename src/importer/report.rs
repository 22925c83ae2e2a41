//! Diagnostics and the import report

use serde::{Deserialize, Serialize};

/// How serious a diagnostic is. Ordered `Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something was recognized
    Info,
    /// Deviation from the heading convention; data is still imported
    Warning,
    /// Unparseable or contradictory structure; nothing is imported
    Error,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
            Severity::Error => "✗",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single message produced while parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Line number (1-indexed) in the source document, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Ordered list of diagnostics from one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, line: Option<usize>, message: impl Into<String>) {
        self.items.push(Diagnostic {
            severity,
            message: message.into(),
            line,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, None, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, None, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, None, message);
    }

    pub fn info_at(&mut self, line: usize, message: impl Into<String>) {
        self.push(Severity::Info, Some(line), message);
    }

    pub fn warning_at(&mut self, line: usize, message: impl Into<String>) {
        self.push(Severity::Warning, Some(line), message);
    }

    pub fn error_at(&mut self, line: usize, message: impl Into<String>) {
        self.push(Severity::Error, Some(line), message);
    }

    /// Highest severity seen, `None` when there are no diagnostics
    pub fn max_severity(&self) -> Option<Severity> {
        self.items.iter().map(|d| d.severity).max()
    }

    pub fn has_errors(&self) -> bool {
        self.max_severity() == Some(Severity::Error)
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_severity(self.max_severity())
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|d| d.severity == severity).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// What the user is told after an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing was applied
    Failed,
    /// Fields were applied, but the document needs review before saving
    PartialSuccess,
    Success,
}

impl Outcome {
    pub fn from_severity(severity: Option<Severity>) -> Self {
        match severity {
            Some(Severity::Error) => Outcome::Failed,
            Some(Severity::Warning) => Outcome::PartialSuccess,
            Some(Severity::Info) | None => Outcome::Success,
        }
    }

    /// Whether imported fields reach the form
    pub fn applies(self) -> bool {
        self != Outcome::Failed
    }

    pub fn title(self) -> &'static str {
        match self {
            Outcome::Failed => "Import failed",
            Outcome::PartialSuccess => "Imported with warnings, review and save to keep the changes",
            Outcome::Success => "Import succeeded",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Failed => write!(f, "failed"),
            Outcome::PartialSuccess => write!(f, "partial_success"),
            Outcome::Success => write!(f, "success"),
        }
    }
}

/// Complete report of one import run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    /// Input file path
    pub input_file: String,
    /// Problem title the document was checked against
    pub title: Option<String>,
    /// Timestamp of the import
    pub timestamp: String,
    /// Duration in milliseconds
    pub duration_ms: u64,
    pub outcome: Outcome,
    pub diagnostics: Diagnostics,
}

impl ImportReport {
    pub fn new(input: &str, title: Option<&str>, diagnostics: Diagnostics) -> Self {
        Self {
            input_file: input.to_string(),
            title: title.map(str::to_string),
            timestamp: chrono::Utc::now().to_rfc3339(),
            duration_ms: 0,
            outcome: diagnostics.outcome(),
            diagnostics,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to human-readable text format
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        let icon = self
            .diagnostics
            .max_severity()
            .unwrap_or(Severity::Info)
            .icon();
        output.push_str(&format!("{} {}\n", icon, self.outcome.title()));
        output.push_str(&format!("Input:    {}\n", self.input_file));
        if let Some(title) = &self.title {
            output.push_str(&format!("Title:    {}\n", title));
        }
        output.push_str(&format!("Date:     {}\n", self.timestamp));
        output.push_str(&format!("Time:     {}ms\n", self.duration_ms));
        output.push_str(&format!(
            "Messages: {} info, {} warning(s), {} error(s)\n\n",
            self.diagnostics.count(Severity::Info),
            self.diagnostics.count(Severity::Warning),
            self.diagnostics.count(Severity::Error),
        ));

        for diagnostic in &self.diagnostics {
            output.push_str(&format!("{} {}\n", diagnostic.severity.icon(), diagnostic));
        }

        output
    }
}
