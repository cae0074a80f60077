//! Markdown serialization (tree → lesson markdown)
//!
//! Every kind has one pure function producing its exact source syntax.
//! [`MarkdownSerializer`] walks the tree, joins blocks with a blank line
//! and escapes prose so that reading the output back yields the same tree.

use crate::error::FormatError;
use crate::formats::tag::serializer::render_table_lines;
use crate::grammar::rules::code::backtick_line;
use crate::grammar::rules::question::{answer_letter, QUESTION_FENCE};
use crate::ir::custom::NodeKind;
use crate::ir::nodes::*;
use crate::schema::{Schema, SchemaOptions};
use log::debug;

/// Characters escaped wherever they appear in text. Every `[` is escaped,
/// not only a pair, since a text `[` can meet a chemical structure's `[[`.
const ESCAPED: &[char] = &['\\', '`', '*', '_', '$', '|', '['];

/// Characters escaped when they start a line.
const LINE_START: &[char] = &['#', '>', '-', '+', ':', '{', '<'];

pub fn serialize_inline_equation(eq: &InlineEquation) -> String {
    format!("${}$", eq.formula)
}

pub fn serialize_block_equation(eq: &BlockEquation) -> String {
    format!("$${}$$", eq.formula)
}

pub fn serialize_embed(embed: &Embed) -> String {
    format!("{{{{{}}}}}", embed.text)
}

pub fn serialize_vocabulary(vocab: &Vocabulary) -> String {
    format!("|{}: {}|", vocab.term, vocab.definition)
}

pub fn serialize_chemical_structure(chem: &ChemicalStructure) -> String {
    format!("[[{}]]", chem.smiles)
}

/// A fence of at least three backticks, longer than any backtick-only line
/// in the content.
pub fn serialize_code_block(code: &CodeBlock, default_language: &str) -> String {
    let language = code
        .language
        .as_deref()
        .filter(|l| !l.is_empty())
        .unwrap_or(default_language);
    let longest = code.content.lines().filter_map(backtick_line).max().unwrap_or(0);
    let fence = "`".repeat(longest.max(2) + 1);
    format!("{fence}{language}\n{}\n{fence}", code.content)
}

/// The options line: texts joined by ` | `. A lone option, or a trailing
/// empty one, gets a closing ` |` so the line still reads as options.
pub fn serialize_options(options: &[Paragraph]) -> String {
    let texts: Vec<String> = options
        .iter()
        .map(|option| option.plain_text().replace('\n', " "))
        .collect();
    let mut line = texts.join(" | ");
    if texts.len() == 1 || texts.last().is_some_and(|t| t.trim().is_empty()) {
        line.push_str(" |");
    }
    line
}

/// The answer line for the correct option, if it resolves to a letter.
pub fn answer_line(question: &Question) -> Option<String> {
    let index = question.correct_index();
    if question.correct_option.is_some() && index.is_none() {
        debug!("correct option matches no option; leaving it out");
    }
    index
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i as u8).to_string())
}

pub fn serialize_table(table: &Table) -> Result<String, FormatError> {
    Ok(render_table_lines(table)?.join("\n"))
}

/// Serializes documents and blocks to lesson markdown.
///
/// Kinds missing from the schema are written as the literal text of their
/// syntax, escaped, which is how that schema reads them back.
#[derive(Debug, Clone, Default)]
pub struct MarkdownSerializer {
    options: SchemaOptions,
    disabled: Vec<NodeKind>,
}

impl MarkdownSerializer {
    /// Every kind enabled.
    pub fn new(options: SchemaOptions) -> Self {
        MarkdownSerializer {
            options,
            disabled: Vec::new(),
        }
    }

    pub fn for_schema(schema: &Schema) -> Self {
        MarkdownSerializer {
            options: schema.options().clone(),
            disabled: NodeKind::ALL
                .into_iter()
                .filter(|kind| !schema.is_enabled(*kind))
                .collect(),
        }
    }

    pub fn with_options(mut self, options: SchemaOptions) -> Self {
        self.options = options;
        self
    }

    fn writes(&self, kind: NodeKind) -> bool {
        !self.disabled.contains(&kind)
    }

    /// The enabled syntax of a disabled block, as a prose paragraph.
    fn literal_block(&self, block: &Block) -> Result<String, FormatError> {
        let source = MarkdownSerializer::new(self.options.clone()).block(block)?;
        Ok(self.paragraph(&Paragraph::new(vec![Inline::Text(source)])))
    }

    pub fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        self.blocks(&doc.children)
    }

    /// Child serialization: blocks separated by one blank line. Blocks that
    /// render to nothing are left out.
    pub fn blocks(&self, blocks: &[Block]) -> Result<String, FormatError> {
        let mut parts = Vec::with_capacity(blocks.len());
        for block in blocks {
            let rendered = self.block(block)?;
            if !rendered.is_empty() {
                parts.push(rendered);
            }
        }
        Ok(parts.join("\n\n"))
    }

    pub fn block(&self, block: &Block) -> Result<String, FormatError> {
        if let Some(kind) = block_kind(block) {
            if !self.writes(kind) {
                return self.literal_block(block);
            }
        }
        Ok(match block {
            Block::Paragraph(paragraph) => self.paragraph(paragraph),
            Block::Heading(heading) => self.heading(heading),
            Block::List(list) => self.list(list)?,
            Block::Blockquote(quote) => prefix_lines(&self.blocks(&quote.children)?),
            Block::ThematicBreak => "---".to_string(),
            Block::CodeBlock(code) => {
                serialize_code_block(code, &self.options.default_code_language)
            }
            Block::BlockEquation(eq) => serialize_block_equation(eq),
            Block::Embed(embed) => serialize_embed(embed),
            Block::Question(question) => self.question(question)?,
            Block::Table(table) => serialize_table(table)?,
        })
    }

    fn paragraph(&self, paragraph: &Paragraph) -> String {
        self.inlines(&paragraph.content, Marks::default())
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(escape_line_start)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn heading(&self, heading: &Heading) -> String {
        let hashes = "#".repeat(heading.level.clamp(1, 6));
        let text = self
            .inlines(&heading.content, Marks::default())
            .replace('\n', " ");
        let text = text.trim();
        if text.is_empty() {
            hashes
        } else {
            format!("{hashes} {text}")
        }
    }

    fn list(&self, list: &List) -> Result<String, FormatError> {
        let mut items = Vec::with_capacity(list.items.len());
        for (index, item) in list.items.iter().enumerate() {
            let marker = if list.ordered {
                format!("{}. ", index + 1)
            } else {
                "- ".to_string()
            };
            let body = self.blocks(&item.children)?;
            if body.is_empty() {
                items.push(marker.trim_end().to_string());
                continue;
            }
            let indent = " ".repeat(marker.len());
            let mut lines = body.split('\n');
            let mut rendered = format!("{marker}{}", lines.next().unwrap_or_default());
            for line in lines {
                rendered.push('\n');
                if !line.is_empty() {
                    rendered.push_str(&indent);
                    rendered.push_str(line);
                }
            }
            items.push(rendered);
        }
        Ok(items.join("\n"))
    }

    /// `::?`, options, answer letter, body, `::?`. A blank line separates
    /// the body when its first line would otherwise be read as options or
    /// as the answer.
    pub fn question(&self, question: &Question) -> Result<String, FormatError> {
        let mut lines = vec![QUESTION_FENCE.to_string()];
        if !question.options.is_empty() {
            lines.push(serialize_options(&question.options));
        }
        let answer = if question.options.is_empty() {
            None
        } else {
            answer_line(question)
        };
        let body = self.blocks(&question.children)?;

        match answer {
            Some(letter) => lines.push(letter),
            None => {
                if let Some(first) = body.lines().next() {
                    if misread_as_header(first, &question.options) {
                        lines.push(String::new());
                    }
                }
            }
        }
        if !body.is_empty() {
            lines.push(body);
        }
        lines.push(QUESTION_FENCE.to_string());
        Ok(lines.join("\n"))
    }

    fn inlines(&self, content: &[Inline], marks: Marks) -> String {
        let mut out = String::new();
        // End of the last equation written, if nothing followed it yet.
        let mut equation_end = None;
        for inline in content {
            if let Some(kind) = inline_kind(inline) {
                if !self.writes(kind) {
                    let source = MarkdownSerializer::new(self.options.clone())
                        .inlines(std::slice::from_ref(inline), marks);
                    out.push_str(&escape_text(&source));
                    continue;
                }
            }
            match inline {
                Inline::Text(text) => out.push_str(&escape_text(text)),
                Inline::Strong(children) => {
                    let inner = self.inlines(children, Marks { strong: true, ..marks });
                    wrap_mark(&mut out, &inner, "**", marks.strong);
                }
                Inline::Emphasis(children) => {
                    let inner = self.inlines(children, Marks { emphasis: true, ..marks });
                    wrap_mark(&mut out, &inner, "_", marks.emphasis);
                }
                Inline::Code(code) => out.push_str(&code_span(code)),
                Inline::InlineEquation(eq) => {
                    if !eq.formula.is_empty() {
                        // `$a$$b$` reads as prose
                        if equation_end == Some(out.len()) {
                            out.push(' ');
                        }
                        out.push_str(&serialize_inline_equation(eq));
                        equation_end = Some(out.len());
                    }
                }
                Inline::Vocabulary(vocab) => out.push_str(&serialize_vocabulary(vocab)),
                Inline::ChemicalStructure(chem) => {
                    out.push_str(&serialize_chemical_structure(chem))
                }
            }
        }
        out
    }
}

fn block_kind(block: &Block) -> Option<NodeKind> {
    Some(match block {
        Block::CodeBlock(_) => NodeKind::CodeBlock,
        Block::BlockEquation(_) => NodeKind::BlockEquation,
        Block::Embed(_) => NodeKind::Embed,
        Block::Question(_) => NodeKind::Question,
        Block::Table(_) => NodeKind::Table,
        _ => return None,
    })
}

fn inline_kind(inline: &Inline) -> Option<NodeKind> {
    Some(match inline {
        Inline::InlineEquation(_) => NodeKind::InlineEquation,
        Inline::Vocabulary(_) => NodeKind::Vocabulary,
        Inline::ChemicalStructure(_) => NodeKind::ChemicalStructure,
        _ => return None,
    })
}

/// Marks already open around the content being rendered.
#[derive(Debug, Clone, Copy, Default)]
struct Marks {
    strong: bool,
    emphasis: bool,
}

/// A mark nested in the same mark, or around blank content, adds nothing.
fn wrap_mark(out: &mut String, inner: &str, delimiter: &str, already_open: bool) {
    if already_open || inner.trim().is_empty() {
        out.push_str(inner);
    } else {
        out.push_str(delimiter);
        out.push_str(inner);
        out.push_str(delimiter);
    }
}

fn misread_as_header(first: &str, options: &[Paragraph]) -> bool {
    let first = first.trim();
    if options.is_empty() {
        return first.contains('|');
    }
    answer_letter(first).is_some()
        || (!first.is_empty() && options.iter().any(|o| o.plain_text() == first))
}

fn prefix_lines(body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    body.split('\n')
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Keep a prose line from opening a block construct.
pub(crate) fn escape_line_start(line: &str) -> String {
    if line.starts_with(LINE_START) {
        return format!("\\{line}");
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && line[digits..].starts_with('.') {
        return format!("{}\\{}", &line[..digits], &line[digits..]);
    }
    line.to_string()
}

fn code_span(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }
    let mut longest = 0;
    let mut run = 0;
    for c in code.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    let fence = "`".repeat(longest + 1);
    let pad = code.starts_with('`')
        || code.ends_with('`')
        || (code.len() >= 2 && code.starts_with(' ') && code.ends_with(' ') && !code.trim().is_empty());
    if pad {
        format!("{fence} {code} {fence}")
    } else {
        format!("{fence}{code}{fence}")
    }
}
