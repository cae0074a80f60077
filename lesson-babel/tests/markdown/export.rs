//! Export tests for the markdown format (tree → lesson markdown)

use crate::common::{kitchensink, para, para_text, text};
use insta::assert_snapshot;
use lesson_babel::format::Format;
use lesson_babel::formats::markdown::MarkdownFormat;
use lesson_babel::ir::nodes::*;
use lesson_babel::{Schema, SchemaOptions};
use std::collections::HashMap;

fn to_md(doc: &Document) -> String {
    MarkdownFormat::default().serialize(doc).unwrap()
}

#[test]
fn test_kitchensink_export() {
    assert_snapshot!(to_md(&kitchensink()), @r###"
# Stoichiometry

One |mole: 6.022e23 particles| of [[O=O]] weighs $32g$, **always**.

$$n = m / M$$

```python
def moles(m, M):
    return m / M
```

{{https://example.com/titration}}

1. weigh
2. divide

::?
16 | 32 | 64
B
Molar mass of oxygen gas?
::?

<table>
<tr><th><p>Element</p></th><th><p>Symbol</p></th></tr>
<tr><td><p>Sodium</p></td><td><p>Na</p></td></tr>
</table>
"###);
}

#[test]
fn test_prose_delimiters_are_escaped() {
    let doc = Document::new(vec![para_text("costs $5 | $6 with a_b and [x]")]);
    assert_eq!(to_md(&doc), r"costs \$5 \| \$6 with a\_b and \[x]");
}

#[test]
fn test_line_starts_are_escaped() {
    let doc = Document::new(vec![
        para_text("# not a heading"),
        para_text("::? not a question"),
        para_text("1. not a list"),
    ]);
    assert_eq!(
        to_md(&doc),
        "\\# not a heading\n\n\\::? not a question\n\n1\\. not a list"
    );
}

#[test]
fn test_code_block_without_language_uses_default() {
    let doc = Document::new(vec![Block::CodeBlock(CodeBlock {
        language: None,
        content: "x = 1".to_string(),
    })]);
    assert_eq!(to_md(&doc), "```javascript\nx = 1\n```");

    let schema = Schema::standard().with_options(SchemaOptions {
        default_code_language: "python".to_string(),
    });
    assert_eq!(
        MarkdownFormat::new(schema).serialize(&doc).unwrap(),
        "```python\nx = 1\n```"
    );
}

#[test]
fn test_code_language_option_overrides_schema() {
    let doc = Document::new(vec![Block::CodeBlock(CodeBlock {
        language: None,
        content: "SELECT 1".to_string(),
    })]);
    let mut options = HashMap::new();
    options.insert("code-language".to_string(), "sql".to_string());
    let md = MarkdownFormat::default()
        .serialize_with_options(&doc, &options)
        .unwrap();
    assert_eq!(md.into_string(), "```sql\nSELECT 1\n```");
}

#[test]
fn test_fence_grows_past_backtick_lines() {
    let doc = Document::new(vec![Block::CodeBlock(CodeBlock {
        language: Some("md".to_string()),
        content: "```\ninner\n```".to_string(),
    })]);
    assert_eq!(to_md(&doc), "````md\n```\ninner\n```\n````");
}

#[test]
fn test_single_option_question_keeps_terminator() {
    let doc = Document::new(vec![Block::Question(Question {
        options: vec![Paragraph::from_text("Option A")],
        correct_option: None,
        children: vec![para_text("Enter your question here...")],
    })]);
    assert_eq!(
        to_md(&doc),
        "::?\nOption A |\nEnter your question here...\n::?"
    );
}

#[test]
fn test_unresolved_correct_option_is_dropped() {
    let doc = Document::new(vec![Block::Question(Question {
        options: vec![Paragraph::from_text("x"), Paragraph::from_text("y")],
        correct_option: Some(Paragraph::from_text("z")),
        children: vec![para_text("Pick")],
    })]);
    assert_eq!(to_md(&doc), "::?\nx | y\nPick\n::?");
}

#[test]
fn test_body_that_reads_as_answer_is_separated() {
    let doc = Document::new(vec![Block::Question(Question {
        options: vec![Paragraph::from_text("x"), Paragraph::from_text("y")],
        correct_option: None,
        children: vec![para_text("B")],
    })]);
    assert_eq!(to_md(&doc), "::?\nx | y\n\nB\n::?");
}

#[test]
fn test_nested_list_indentation() {
    let doc = Document::new(vec![Block::List(List {
        ordered: false,
        items: vec![ListItem {
            children: vec![
                para(vec![text("outer")]),
                Block::List(List {
                    ordered: false,
                    items: vec![ListItem {
                        children: vec![para_text("inner")],
                    }],
                }),
            ],
        }],
    })]);
    assert_eq!(to_md(&doc), "- outer\n\n  - inner");
}

#[test]
fn test_marks_and_code_spans() {
    let doc = Document::new(vec![para(vec![
        Inline::Strong(vec![text("bold "), Inline::Emphasis(vec![text("both")])]),
        text(" and "),
        Inline::Code("a`b".to_string()),
    ])]);
    assert_eq!(to_md(&doc), "**bold _both_** and ``a`b``");
}
