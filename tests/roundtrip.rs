//! Export then import must give the statement back

use judge_statement::exporter::MarkdownExporter;
use judge_statement::form::{apply_import, FormState};
use judge_statement::importer::{ImportOptions, MarkdownImporter, Outcome, Severity};
use judge_statement::statement::{Example, ProblemStatement};

const TITLE: &str = "A+B Problem";

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn importer() -> MarkdownImporter {
    MarkdownImporter::new(ImportOptions::new().with_title(TITLE))
}

fn round_trip(statement: &ProblemStatement) -> ProblemStatement {
    let md = MarkdownExporter::new().to_markdown(TITLE, statement);
    let result = importer().import(&md);
    assert!(
        !result.diagnostics.has_errors(),
        "errors importing:\n{}\n{:?}",
        md,
        result.diagnostics
    );
    result.statement.unwrap()
}

fn full_statement() -> ProblemStatement {
    ProblemStatement {
        description: text("Compute $a+b$.\n\n```cpp\n## not a heading\n```"),
        input: text("Two integers $a$ and $b$."),
        output: text("Their sum."),
        examples: vec![
            Example {
                name: text("样例 1"),
                input: text("1 2"),
                output: text("3"),
                description: text("Straightforward.\n\nReally."),
            },
            Example {
                name: text("no input"),
                input: None,
                output: text("42"),
                description: None,
            },
            Example {
                name: text("multi line"),
                input: text("3\n1 2 3\n"),
                output: text("  6"),
                description: None,
            },
            Example {
                name: text("tricky"),
                input: text("```\nx\n```"),
                output: text("（无）"),
                description: text("The input contains a fence."),
            },
        ],
        data_range: text("$|a|, |b| \\le 10^9$"),
    }
}

#[test]
fn test_full_round_trip() {
    let statement = full_statement();
    assert_eq!(round_trip(&statement), statement);
}

#[test]
fn test_round_trip_without_examples() {
    let statement = ProblemStatement {
        description: text("Just text."),
        data_range: text("n = 1"),
        ..Default::default()
    };
    assert_eq!(round_trip(&statement), statement);
}

#[test]
fn test_round_trip_single_unnamed_example() {
    let statement = ProblemStatement {
        examples: vec![Example {
            name: None,
            input: text("1 2"),
            output: None,
            description: text("Output is empty."),
        }],
        ..Default::default()
    };
    assert_eq!(round_trip(&statement), statement);
}

#[test]
fn test_round_trip_unnamed_examples() {
    let statement = ProblemStatement {
        examples: vec![
            Example {
                input: text("1"),
                output: text("2"),
                ..Default::default()
            },
            Example {
                input: text("3"),
                output: text("4"),
                description: text("second"),
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    let md = MarkdownExporter::new().to_markdown(TITLE, &statement);
    let result = importer().import(&md);
    assert_eq!(result.outcome(), Outcome::PartialSuccess);
    assert_eq!(result.statement.unwrap(), statement);
}

#[test]
fn test_round_trip_fenced_headings_in_example_description() {
    let statement = ProblemStatement {
        examples: vec![
            Example {
                name: text("a"),
                input: text("1 2"),
                output: text("3"),
                description: text("Explanation:\n\n```\n### step 1\n#### 输入\n```"),
            },
            Example {
                name: text("b"),
                input: None,
                output: None,
                description: text("````\n```\n### 输出\n```\n````\n\nAfter the block."),
            },
        ],
        ..Default::default()
    };
    let md = MarkdownExporter::new().to_markdown(TITLE, &statement);
    let result = importer().import(&md);
    let warnings: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(warnings, vec!["example 'b' has neither input nor output"]);
    assert_eq!(result.statement.unwrap(), statement);
}

#[test]
fn test_exported_document_has_no_warnings() {
    let md = MarkdownExporter::new().to_markdown(TITLE, &full_statement());
    let result = importer().import(&md);
    assert_eq!(result.diagnostics.max_severity(), Some(Severity::Info));
}

#[test]
fn test_import_is_idempotent() {
    let md = MarkdownExporter::new().to_markdown(TITLE, &full_statement());
    let importer = importer();

    let mut form = FormState::default();
    let first = importer.import(&md);
    apply_import(&first, &mut form);
    let after_first = form.clone();

    let second = importer.import(&md);
    apply_import(&second, &mut form);
    assert_eq!(first, second);
    assert_eq!(form, after_first);

    // Exporting what was imported gives the same document again.
    let again = MarkdownExporter::new().to_markdown(TITLE, &form.statement);
    assert_eq!(again, md);
}
