//! Integration tests for markdown import

use judge_statement::importer::{
    ImportOptions, ImportResult, MarkdownImporter, Outcome, Severity,
};
use judge_statement::statement::Field;

fn import(md: &str) -> ImportResult {
    MarkdownImporter::new(ImportOptions::new().with_title("A+B Problem")).import(md)
}

fn messages(result: &ImportResult, severity: Severity) -> Vec<String> {
    result
        .diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .map(|d| d.message.clone())
        .collect()
}

#[test]
fn test_hand_written_document() {
    let md = r#"# A+B Problem

## 题目描述

Given two integers, print their sum.

## 输入格式

One line with $a$ and $b$.

## 输出格式

One integer.

## 样例

### 输入

```
1 2
```

### 输出

```
3
```

Just add.

## 数据范围

$0 \le a, b \le 100$
"#;
    let result = import(md);
    assert_eq!(result.outcome(), Outcome::Success);
    assert_eq!(result.fields, Field::ALL.to_vec());

    let statement = result.statement.as_ref().unwrap();
    assert_eq!(
        statement.description.as_deref(),
        Some("Given two integers, print their sum.")
    );
    assert_eq!(statement.examples.len(), 1);
    assert_eq!(statement.examples[0].name, None);
    assert_eq!(statement.examples[0].input.as_deref(), Some("1 2"));
    assert_eq!(statement.examples[0].output.as_deref(), Some("3"));
    assert_eq!(statement.examples[0].description.as_deref(), Some("Just add."));
    assert_eq!(
        statement.data_range.as_deref(),
        Some(r"$0 \le a, b \le 100$")
    );

    let infos = messages(&result, Severity::Info);
    for field in Field::ALL {
        assert!(
            infos.contains(&format!("recognized field '{}'", field.label())),
            "missing info for {}",
            field
        );
    }
    assert!(infos.contains(&"recognized example '（无名）'".to_string()));
}

#[test]
fn test_output_before_description_is_rejected() {
    let result = import("# A+B Problem\n\n## 输出格式\n\nsum\n\n## 题目描述\n\nadd\n");
    assert_eq!(result.outcome(), Outcome::Failed);
    assert!(result.statement.is_none());
    assert!(result.fields.is_empty());
    assert_eq!(messages(&result, Severity::Error).len(), 1);
}

#[test]
fn test_duplicate_description_is_rejected() {
    let result = import("# A+B Problem\n## 题目描述\none\n## 题目描述\ntwo\n");
    assert_eq!(result.outcome(), Outcome::Failed);
    assert!(result.statement.is_none());
    assert!(messages(&result, Severity::Error)[0].contains("duplicate"));
}

#[test]
fn test_example_with_only_output() {
    let md = "# A+B Problem\n## 样例\n### only\n#### 输出\n```\nhello\n```\n";
    let result = import(md);
    let statement = result.statement.clone().unwrap();
    assert_eq!(statement.examples.len(), 1);
    assert_eq!(statement.examples[0].input, None);
    assert_eq!(statement.examples[0].output.as_deref(), Some("hello"));
    assert!(!result
        .diagnostics
        .iter()
        .any(|d| d.message.contains("neither input nor output")));
}

#[test]
fn test_unnamed_single_example_has_no_name_warning() {
    let md = "# A+B Problem\n## 样例\n### 输入\n```\n1\n```\n### 输出\n```\n1\n```\n";
    let result = import(md);
    assert_eq!(result.outcome(), Outcome::Success);
    assert!(messages(&result, Severity::Warning).is_empty());
}

#[test]
fn test_unnamed_among_several_examples() {
    let md = "# A+B Problem
## 样例
### 输入
```
1
```
### 输出
```
1
```
### second
#### 输入
```
2
```
#### 输出
```
2
```
";
    let result = import(md);
    assert_eq!(result.outcome(), Outcome::PartialSuccess);
    assert_eq!(
        messages(&result, Severity::Warning),
        vec!["1 of 2 examples have no name".to_string()]
    );
    let statement = result.statement.unwrap();
    assert_eq!(statement.examples.len(), 2);
    assert_eq!(statement.examples[1].name.as_deref(), Some("second"));
}

#[test]
fn test_empty_file() {
    let result = import("\n   \n");
    assert_eq!(result.outcome(), Outcome::Failed);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(messages(&result, Severity::Error), vec!["file is empty".to_string()]);
}

#[test]
fn test_unknown_heading_is_folded_into_open_field() {
    let md = "# A+B Problem\n## 题目描述\nAdd.\n## 备注\nBe careful.\n## 输入格式\nints\n";
    let result = import(md);
    assert_eq!(result.outcome(), Outcome::PartialSuccess);
    assert_eq!(
        messages(&result, Severity::Warning),
        vec!["unrecognized heading '备注'".to_string()]
    );
    let statement = result.statement.unwrap();
    assert!(statement.description.unwrap().contains("Be careful."));
    assert_eq!(statement.input.as_deref(), Some("ints"));
}

#[test]
fn test_unknown_heading_without_open_field_is_dropped() {
    let result = import("# A+B Problem\n## 备注\nBe careful.\n## 题目描述\nAdd.\n");
    assert_eq!(result.outcome(), Outcome::PartialSuccess);
    let statement = result.statement.unwrap();
    assert_eq!(statement.description.as_deref(), Some("Add."));
    assert_eq!(result.fields, vec![Field::Description]);
}

#[test]
fn test_wrong_title_still_imports() {
    let result = import("# A-B Problem\n## 题目描述\nSubtract.\n");
    assert_eq!(result.outcome(), Outcome::PartialSuccess);
    assert_eq!(messages(&result, Severity::Warning).len(), 1);
    assert!(result.statement.is_some());
}

#[test]
fn test_title_is_case_sensitive() {
    let result = import("# a+b problem\n## 题目描述\nx\n");
    assert_eq!(messages(&result, Severity::Warning).len(), 1);
}

#[test]
fn test_level_three_heading_in_named_example_is_lenient() {
    let md = "# A+B Problem\n## 样例\n### 样例 1\n### 输入\n```\n1 2\n```\n### 输出\n```\n3\n```\n";
    let result = import(md);
    assert_eq!(result.outcome(), Outcome::PartialSuccess);
    assert_eq!(messages(&result, Severity::Warning).len(), 2);
    let example = &result.statement.unwrap().examples[0];
    assert_eq!(example.name.as_deref(), Some("样例 1"));
    assert_eq!(example.input.as_deref(), Some("1 2"));
    assert_eq!(example.output.as_deref(), Some("3"));
}

#[test]
fn test_garbage_before_block_rejects_document() {
    let md = "# A+B Problem\n## 样例\n### a\n#### 输入\nsee below\n```\n1\n```\n";
    let result = import(md);
    assert_eq!(result.outcome(), Outcome::Failed);
    assert!(messages(&result, Severity::Error)[0].starts_with("garbage line before 输入"));
}

#[test]
fn test_unterminated_example_block_rejects_document() {
    let md = "# A+B Problem\n## 样例\n### a\n#### 输入\n```\n1 2\n\n## 数据范围\nsmall\n";
    let result = import(md);
    assert_eq!(result.outcome(), Outcome::Failed);
}

#[test]
fn test_zero_example_section_is_present_but_empty() {
    let result = import("# A+B Problem\n## 题目描述\nAdd.\n## 样例\n\n## 数据范围\nsmall\n");
    assert_eq!(result.outcome(), Outcome::Success);
    assert_eq!(
        result.fields,
        vec![Field::Description, Field::Examples, Field::DataRange]
    );
    assert!(result.statement.unwrap().examples.is_empty());

    let absent = import("# A+B Problem\n## 题目描述\nAdd.\n");
    assert!(!absent.fields.contains(&Field::Examples));
}

#[test]
fn test_windows_line_endings() {
    let md = "# A+B Problem\r\n## 样例\r\n### a\r\n#### 输入\r\n```\r\n1 2\r\n```\r\n";
    let result = import(md);
    let example = &result.statement.unwrap().examples[0];
    assert_eq!(example.input.as_deref(), Some("1 2"));
}

#[test]
fn test_inline_code_line_does_not_open_fence() {
    let md = "# A+B Problem\n## 题目描述\n```a+b``` is the expression.\n## 输入格式\nints\n";
    let result = import(md);
    assert_eq!(result.outcome(), Outcome::Success);
    assert_eq!(result.fields, vec![Field::Description, Field::Input]);
    let statement = result.statement.unwrap();
    assert_eq!(statement.description.as_deref(), Some("```a+b``` is the expression."));
    assert_eq!(statement.input.as_deref(), Some("ints"));
}

#[test]
fn test_unterminated_fence_in_example_description() {
    let md = "# A+B Problem\n## 样例\n### a\n#### 输入\n```\n1\n```\n#### 输出\n```\n2\n```\nsee:\n```\n### not an example\n";
    let result = import(md);
    assert_eq!(result.outcome(), Outcome::PartialSuccess);
    assert_eq!(
        messages(&result, Severity::Warning),
        vec!["unterminated code block in description of example 'a'".to_string()]
    );
    let examples = result.statement.unwrap().examples;
    assert_eq!(examples.len(), 1);
    assert_eq!(
        examples[0].description.as_deref(),
        Some("see:\n```\n### not an example")
    );
}
