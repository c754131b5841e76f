pub mod html;
pub mod json;
pub mod text;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use html::{HtmlConfig, HtmlFormatter, convert_to_html, escape_html};
pub use json::{JsonConfig, JsonFormatter, convert_to_json};
pub use text::{TextConfig, TextFormatter, convert_to_text};

use crate::Result;
use crate::record::ExportRecord;

/// Output format for an exported record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Txt,
    /// Standalone HTML for conversion to EPUB with external tools
    Html,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Txt),
            "html" | "htm" | "epub" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format '{}', expected txt, html or json", other)),
        }
    }
}

/// Per-format settings used by [`render`]
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub text: TextConfig,
    pub html: HtmlConfig,
    pub json: JsonConfig,
}

/// Render `record` in `format`
pub fn render(record: &ExportRecord, format: ExportFormat, config: &RenderConfig) -> Result<String> {
    match format {
        ExportFormat::Txt => Ok(convert_to_text(record, &config.text)),
        ExportFormat::Html => Ok(convert_to_html(record, &config.html)),
        ExportFormat::Json => convert_to_json(record, &config.json),
    }
}

/// Replaces characters that are invalid in file names on common platforms with `_`
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

/// `<sanitized title>.<extension>`
pub fn export_filename(record: &ExportRecord, format: ExportFormat) -> String {
    format!("{}.{}", sanitize_filename(record.title()), format.extension())
}

/// Render `record` and write it into `dir` under [`export_filename`].
///
/// Returns the path written.
pub fn write_export(record: &ExportRecord, format: ExportFormat, config: &RenderConfig, dir: &Path) -> Result<PathBuf> {
    let rendered = render(record, format, config)?;
    let path = dir.join(export_filename(record, format));
    fs::write(&path, rendered)?;
    tracing::debug!(path = %path.display(), %format, "wrote export");
    Ok(path)
}
