//! Applying an import to an editing surface
//!
//! Parsing is pure; writing the result into whatever holds the statement
//! being edited goes through [`StatementForm`].

use crate::importer::{ImportResult, Outcome};
use crate::statement::{Example, Field, ProblemStatement};

/// Something that holds the statement fields being edited
pub trait StatementForm {
    /// Replace a text field. Never called with [`Field::Examples`].
    fn set_field(&mut self, field: Field, value: Option<&str>);
    /// Replace the whole example list
    fn set_examples(&mut self, examples: &[Example]);
}

/// Write every field the document contained into `form`.
///
/// Nothing is written when the import produced an error. Fields missing
/// from the document keep their current content.
pub fn apply_import(result: &ImportResult, form: &mut dyn StatementForm) -> Outcome {
    let outcome = result.outcome();
    let Some(statement) = result.statement.as_ref().filter(|_| outcome.applies()) else {
        log::warn!("Import failed, form left unchanged");
        return Outcome::Failed;
    };

    for &field in &result.fields {
        match field {
            Field::Examples => form.set_examples(&statement.examples),
            _ => form.set_field(field, statement.text(field)),
        }
    }
    log::info!("Applied {} field(s): {}", result.fields.len(), outcome);
    outcome
}

/// In-memory form backed by a [`ProblemStatement`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub statement: ProblemStatement,
}

impl FormState {
    pub fn new(statement: ProblemStatement) -> Self {
        Self { statement }
    }

    pub fn into_statement(self) -> ProblemStatement {
        self.statement
    }
}

impl StatementForm for FormState {
    fn set_field(&mut self, field: Field, value: Option<&str>) {
        self.statement.set_text(field, value.map(str::to_string));
    }

    fn set_examples(&mut self, examples: &[Example]) {
        self.statement.examples = examples.to_vec();
    }
}
