use super::TemplateSnippet;
use crate::formats::markdown::serializer::serialize_code_block;
use crate::ir::nodes::CodeBlock;
use crate::schema::SchemaOptions;
use std::fs;
use std::io;
use std::path::Path;

pub struct CodeSnippetRequest<'a> {
    pub file_path: &'a Path,
    pub options: &'a SchemaOptions,
    pub language: Option<&'a str>,
}

impl<'a> CodeSnippetRequest<'a> {
    pub fn new(file_path: &'a Path, options: &'a SchemaOptions) -> Self {
        Self {
            file_path,
            options,
            language: None,
        }
    }
}

/// A code block holding a source file. Non-UTF-8 files are refused.
pub fn build_code_block(request: &CodeSnippetRequest<'_>) -> io::Result<CodeBlock> {
    let raw = fs::read(request.file_path)?;
    let text = String::from_utf8(raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let content = text.replace("\r\n", "\n");
    let content = content.strip_suffix('\n').unwrap_or(&content).to_string();
    Ok(CodeBlock {
        language: language_label(request),
        content,
    })
}

/// The file as a fenced block, caret at the start of its first line.
pub fn build_code_snippet(request: &CodeSnippetRequest<'_>) -> io::Result<TemplateSnippet> {
    let block = build_code_block(request)?;
    let text = serialize_code_block(&block, &request.options.default_code_language);
    let cursor_offset = text.find('\n').map_or(text.len(), |i| i + 1);
    Ok(TemplateSnippet {
        text,
        cursor_offset,
    })
}

fn language_label(request: &CodeSnippetRequest<'_>) -> Option<String> {
    if let Some(lang) = request.language {
        return Some(canonical_language(lang));
    }
    request
        .file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(language_from_token)
        .map(str::to_string)
}

/// Known aliases map to one name; anything else is kept, lowercased.
pub fn canonical_language(value: &str) -> String {
    let token = value.trim().to_ascii_lowercase();
    language_from_token(&token)
        .map(str::to_string)
        .unwrap_or(token)
}

fn language_from_token(token: &str) -> Option<&'static str> {
    match token.to_ascii_lowercase().as_str() {
        "bash" | "sh" | "zsh" | "shell" => Some("bash"),
        "c" | "h" => Some("c"),
        "cpp" | "cxx" | "cc" | "hpp" | "hh" | "hxx" => Some("cpp"),
        "cs" | "csharp" => Some("csharp"),
        "css" => Some("css"),
        "go" => Some("go"),
        "html" | "htm" => Some("html"),
        "java" => Some("java"),
        "js" | "mjs" | "cjs" | "jsx" | "javascript" => Some("javascript"),
        "json" => Some("json"),
        "kt" | "kts" | "kotlin" => Some("kotlin"),
        "latex" | "tex" => Some("latex"),
        "md" | "markdown" => Some("markdown"),
        "php" => Some("php"),
        "py" | "pyw" | "python" => Some("python"),
        "r" => Some("r"),
        "rb" | "ruby" => Some("ruby"),
        "rs" | "rust" => Some("rust"),
        "sql" => Some("sql"),
        "swift" => Some("swift"),
        "toml" => Some("toml"),
        "ts" | "tsx" | "typescript" => Some("typescript"),
        "xml" => Some("xml"),
        "yaml" | "yml" => Some("yaml"),
        _ => None,
    }
}
