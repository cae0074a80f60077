use lesson_babel::input::EditorHost;
use lesson_babel::ir::nodes::*;
use lesson_babel::{InputRules, NodeKind, Schema, ScratchEditor};

fn rules() -> InputRules {
    InputRules::new(&Schema::standard())
}

fn typed(text: &str) -> ScratchEditor {
    let mut editor = ScratchEditor::new();
    editor.type_text(text, &rules());
    editor
}

#[test]
fn test_inline_equation_converts_on_closing_dollar() {
    let editor = typed("cost $x+1$");
    assert_eq!(
        editor.line(),
        &[
            Inline::Text("cost ".to_string()),
            Inline::InlineEquation(InlineEquation {
                formula: "x+1".to_string()
            }),
        ]
    );
    assert_eq!(editor.text_before_caret(), "cost \u{FFFC}");
}

#[test]
fn test_typing_continues_after_atom() {
    let editor = typed("a [[CCO]] b");
    assert_eq!(
        editor.line(),
        &[
            Inline::Text("a ".to_string()),
            Inline::ChemicalStructure(ChemicalStructure::new("CCO")),
            Inline::Text(" b".to_string()),
        ]
    );
}

#[test]
fn test_vocabulary_converts_on_closing_bar() {
    let editor = typed("a |mole: 6.022e23 things|");
    assert_eq!(
        editor.line().last(),
        Some(&Inline::Vocabulary(Vocabulary {
            term: "mole".to_string(),
            definition: "6.022e23 things".to_string()
        }))
    );
}

#[test]
fn test_double_dollar_becomes_block_equation() {
    let editor = typed("$$E=mc^2$$");
    assert!(editor.line().is_empty());
    assert_eq!(
        editor.blocks(),
        &[Block::BlockEquation(BlockEquation {
            formula: "E=mc^2".to_string()
        })]
    );
}

#[test]
fn test_textblock_rules() {
    let editor = typed("{{https://example.com/v}}");
    assert_eq!(
        editor.blocks(),
        &[Block::Embed(Embed {
            text: "https://example.com/v".to_string()
        })]
    );

    let editor = typed("::?");
    assert!(matches!(editor.blocks(), [Block::Question(_)]));

    let editor = typed("```python ");
    assert_eq!(
        editor.blocks(),
        &[Block::CodeBlock(CodeBlock {
            language: Some("python".to_string()),
            content: String::new()
        })]
    );
}

#[test]
fn test_backspace_unwraps_inline_atom() {
    let rules = rules();
    let mut editor = ScratchEditor::new();
    editor.type_text("cost $x$", &rules);
    editor.backspace(&rules);
    assert_eq!(editor.line(), &[Inline::Text("cost $x$".to_string())]);

    // A further backspace is an ordinary character delete.
    editor.backspace(&rules);
    assert_eq!(editor.text_before_caret(), "cost $x");
}

#[test]
fn test_backspace_unwraps_block_atom() {
    let rules = rules();
    let mut editor = ScratchEditor::new();
    editor.type_text("$$a^2$$", &rules);
    editor.backspace(&rules);
    assert!(editor.blocks().is_empty());
    assert_eq!(editor.text_before_caret(), "$$a^2$$");
}

#[test]
fn test_backspace_with_selection_deletes_atom() {
    let rules = rules();
    let mut editor = ScratchEditor::new();
    editor.type_text("see |ion: charged|", &rules);
    editor.set_selection_empty(false);
    editor.backspace(&rules);
    assert_eq!(editor.line(), &[Inline::Text("see ".to_string())]);
}

#[test]
fn test_disabled_kind_stays_text() {
    let rules = InputRules::new(&Schema::standard().without(NodeKind::InlineEquation));
    let mut editor = ScratchEditor::new();
    editor.type_text("cost $x$", &rules);
    assert_eq!(editor.line(), &[Inline::Text("cost $x$".to_string())]);
}

#[test]
fn test_typed_document_serializes_like_source() {
    let rules = rules();
    let mut editor = ScratchEditor::new();
    editor.type_text("Water is [[O]] with $H_2$", &rules);
    let md = lesson_babel::to_markdown(&editor.document()).unwrap();
    assert_eq!(md, "Water is [[O]] with $H_2$");
}
