use crate::record::ExportRecord;

/// UTF-8 byte order mark, written so Windows editors pick the right encoding
pub const UTF8_BOM: char = '\u{FEFF}';

/// Configuration for plain text output
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Prefix the output with a UTF-8 BOM
    pub include_bom: bool,

    /// Include the Title/Author/Source header block
    pub include_header: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { include_bom: true, include_header: true }
    }
}

/// Plain text formatter for export records
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, record: &ExportRecord) -> String {
        convert_to_text(record, &self.config)
    }
}

/// Render `record` as a plain text document.
///
/// ```text
/// Title: <title>
/// Author: <author>
/// Source: <url or Unknown>
///
/// Description:
/// <description>
///
/// Content:
///
/// <content>
/// ```
///
/// The description block is omitted when the record has none.
pub fn convert_to_text(record: &ExportRecord, config: &TextConfig) -> String {
    let mut output = String::new();

    if config.include_bom {
        output.push(UTF8_BOM);
    }

    if config.include_header {
        output.push_str(&generate_header(record));
        output.push_str("Content:\n\n");
    }

    output.push_str(record.content());
    output
}

fn generate_header(record: &ExportRecord) -> String {
    let source = if record.source_url().is_empty() { "Unknown" } else { record.source_url() };

    let mut header = format!("Title: {}\nAuthor: {}\nSource: {}\n\n", record.title(), record.author(), source);

    if !record.description().is_empty() {
        header.push_str("Description:\n");
        header.push_str(record.description());
        header.push_str("\n\n");
    }

    header
}
