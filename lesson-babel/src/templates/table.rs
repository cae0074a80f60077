use super::TemplateSnippet;
use crate::error::FormatError;
use crate::formats::markdown::serializer::serialize_table;
use crate::ir::nodes::Table;

/// Size of a new table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableTemplate {
    pub rows: usize,
    pub cols: usize,
    pub header_row: bool,
}

impl Default for TableTemplate {
    fn default() -> Self {
        TableTemplate {
            rows: 3,
            cols: 3,
            header_row: true,
        }
    }
}

impl TableTemplate {
    /// Zero sizes are raised to one.
    pub fn build(&self) -> Table {
        Table::new(self.rows.max(1), self.cols.max(1), self.header_row)
    }
}

/// The table as markdown, caret inside the first cell's paragraph.
pub fn build_table_snippet(template: &TableTemplate) -> Result<TemplateSnippet, FormatError> {
    let text = serialize_table(&template.build())?;
    let cursor_offset = text.find("<p>").map_or(0, |i| i + "<p>".len());
    Ok(TemplateSnippet {
        text,
        cursor_offset,
    })
}
