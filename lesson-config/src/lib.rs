//! Shared configuration loader for the lesson toolchain.
//!
//! `defaults/lesson.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`LessonConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use lesson_babel::templates::table::TableTemplate;
use lesson_babel::{NodeKind, Schema, SchemaOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/lesson.default.toml");

/// Top-level configuration consumed by lesson applications.
#[derive(Debug, Clone, Deserialize)]
pub struct LessonConfig {
    pub markdown: MarkdownConfig,
    pub tables: TablesConfig,
    pub inspect: InspectConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub default_code_language: String,
    pub extensions: ExtensionsConfig,
}

/// One switch per lesson construct.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionsConfig {
    pub inline_equation: bool,
    pub block_equation: bool,
    pub code_block: bool,
    pub embed: bool,
    pub vocabulary: bool,
    pub chemical_structure: bool,
    pub question: bool,
    pub table: bool,
}

impl ExtensionsConfig {
    /// Kinds switched off. Rows and cells go with their table.
    pub fn disabled(&self) -> Vec<NodeKind> {
        let switches = [
            (NodeKind::InlineEquation, self.inline_equation),
            (NodeKind::BlockEquation, self.block_equation),
            (NodeKind::CodeBlock, self.code_block),
            (NodeKind::Embed, self.embed),
            (NodeKind::Vocabulary, self.vocabulary),
            (NodeKind::ChemicalStructure, self.chemical_structure),
            (NodeKind::Question, self.question),
            (NodeKind::Table, self.table),
            (NodeKind::TableRow, self.table),
            (NodeKind::TableCell, self.table),
        ];
        switches
            .into_iter()
            .filter(|(_, enabled)| !enabled)
            .map(|(kind, _)| kind)
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TablesConfig {
    pub rows: usize,
    pub cols: usize,
    pub header_row: bool,
}

impl From<&TablesConfig> for TableTemplate {
    fn from(config: &TablesConfig) -> Self {
        TableTemplate {
            rows: config.rows,
            cols: config.cols,
            header_row: config.header_row,
        }
    }
}

/// Controls inspect and json output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub pretty: bool,
}

impl LessonConfig {
    pub fn schema_options(&self) -> SchemaOptions {
        SchemaOptions {
            default_code_language: self.markdown.default_code_language.clone(),
        }
    }

    /// The standard schema minus disabled extensions, with configured options.
    pub fn schema(&self) -> Schema {
        self.markdown
            .extensions
            .disabled()
            .into_iter()
            .fold(Schema::standard(), Schema::without)
            .with_options(self.schema_options())
    }

    pub fn table_template(&self) -> TableTemplate {
        TableTemplate::from(&self.tables)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<LessonConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LessonConfig, ConfigError> {
    Loader::new().build()
}
