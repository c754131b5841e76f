//! Standalone HTML rendering, meant as staging input for e-book converters
//! such as Calibre.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::ExportRecord;

static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n+").expect("valid paragraph-break regex"));

/// Stylesheet embedded in every document unless overridden.
pub const DEFAULT_STYLES: &str = r#"    body {
      font-family: 'Georgia', 'Times New Roman', 'Hiragino Mincho ProN', 'Songti SC', serif;
      line-height: 1.7;
      max-width: 800px;
      margin: 20px auto;
      padding: 20px;
      background-color: #fdfdfd;
      color: #333;
    }
    h1 { text-align: center; margin-bottom: 0.5em; color: #111; }
    .author { text-align: center; margin-bottom: 2em; font-style: italic; color: #555; }
    .source-link { text-align: center; font-size: 0.9em; margin-bottom: 2em; }
    .source-link a { color: #0078d7; text-decoration: none; }
    .cover { text-align: center; margin-bottom: 2em; }
    .cover img { max-width: 90%; max-height: 500px; height: auto; border: 1px solid #eee; }
    .description {
      background-color: #f5f5f5;
      padding: 1em 1.5em;
      border-radius: 5px;
      margin-bottom: 2.5em;
      border-left: 4px solid #0078d7;
    }
    .description h3 { margin-top: 0; color: #005a9e; }
    .content { text-indent: 2em; }
    .content p { margin: 0 0 1em 0; text-align: justify; page-break-inside: avoid; }
    h1, .author, .cover, .description { page-break-after: avoid; }
"#;

/// Configuration for HTML output
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Value of the root `lang` attribute
    pub lang: String,
    /// CSS placed in the document's `<style>` element
    pub styles: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self { lang: "en".to_string(), styles: DEFAULT_STYLES.to_string() }
    }
}

/// HTML formatter for export records
pub struct HtmlFormatter {
    config: HtmlConfig,
}

impl HtmlFormatter {
    pub fn new(config: HtmlConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, record: &ExportRecord) -> String {
        convert_to_html(record, &self.config)
    }
}

/// Escapes `& < > " '` for use in element text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render `record` as a standalone HTML document.
///
/// Body paragraphs are separated by blank lines; a single newline inside a
/// paragraph becomes `<br>` so verse and dialogue layout survives.
pub fn convert_to_html(record: &ExportRecord, config: &HtmlConfig) -> String {
    let title = escape_html(record.title());
    let mut html = format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n  <meta charset=\"UTF-8\">\n  \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  \
         <title>{title}</title>\n  <style>\n{styles}  </style>\n</head>\n<body>\n  \
         <h1>{title}</h1>\n  <div class=\"author\">Author: {author}</div>\n",
        lang = escape_html(&config.lang),
        styles = config.styles,
        author = escape_html(record.author()),
    );

    if !record.source_url().is_empty() {
        let source = escape_html(record.source_url());
        html.push_str(&format!(
            "  <div class=\"source-link\">Source: <a href=\"{source}\" target=\"_blank\" rel=\"noopener noreferrer\">{source}</a></div>\n"
        ));
    }

    if !record.cover_url().is_empty() {
        html.push_str(&format!(
            "  <div class=\"cover\">\n    <img src=\"{}\" alt=\"Cover image\">\n  </div>\n",
            escape_html(record.cover_url())
        ));
    }

    if !record.description().is_empty() {
        html.push_str(&format!(
            "  <div class=\"description\">\n    <h3>Description</h3>\n    <p>{}</p>\n  </div>\n",
            escape_html(record.description()).replace('\n', "<br>")
        ));
    }

    html.push_str("  <div class=\"content\">\n    <h2>Content</h2>\n");
    for paragraph in PARAGRAPH_BREAK_RE.split(record.content()) {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        html.push_str("    <p>");
        html.push_str(&escape_html(paragraph).replace('\n', "<br>"));
        html.push_str("</p>\n");
    }
    html.push_str("  </div>\n</body>\n</html>\n");

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::NovelMetadata;
    use rstest::rstest;

    fn record(metadata: NovelMetadata, content: &str) -> ExportRecord {
        ExportRecord::assemble(metadata, content.to_string()).unwrap()
    }

    #[rstest]
    #[case("a & b", "a &amp; b")]
    #[case("<script>", "&lt;script&gt;")]
    #[case(r#"say "hi""#, "say &quot;hi&quot;")]
    #[case("it's", "it&#039;s")]
    #[case("平文", "平文")]
    fn test_escape_html(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_html(input), expected);
    }

    #[test]
    fn test_paragraphs_and_line_breaks() {
        let html = convert_to_html(
            &record(NovelMetadata::default(), "First line\nsecond line\n\n \n\nNext <para>"),
            &HtmlConfig::default(),
        );

        assert!(html.contains("    <p>First line<br>second line</p>\n"));
        assert!(html.contains("    <p>Next &lt;para&gt;</p>\n"));
        assert_eq!(html.matches("<p>").count(), 2);
    }

    #[test]
    fn test_optional_sections_are_omitted() {
        let html = convert_to_html(&record(NovelMetadata::default(), "Body"), &HtmlConfig::default());

        assert!(!html.contains("source-link\">"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("<h3>Description</h3>"));
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
    }

    #[test]
    fn test_optional_sections_are_rendered() {
        let metadata = NovelMetadata {
            title: "Tom & Jerry".to_string(),
            author: "A".to_string(),
            description: "Line one\nLine two".to_string(),
            cover_url: "https://i.pximg.net/c.jpg?a=1&b=2".to_string(),
            source_url: "https://www.pixiv.net/novel/show.php?id=5".to_string(),
            ..Default::default()
        };
        let config = HtmlConfig { lang: "ja".to_string(), ..Default::default() };
        let html = HtmlFormatter::new(config).convert(&record(metadata, "Body"));

        assert!(html.contains("<html lang=\"ja\">"));
        assert!(html.contains("<title>Tom &amp; Jerry</title>"));
        assert!(html.contains("href=\"https://www.pixiv.net/novel/show.php?id=5\""));
        assert!(html.contains("<img src=\"https://i.pximg.net/c.jpg?a=1&amp;b=2\""));
        assert!(html.contains("<p>Line one<br>Line two</p>"));
    }
}
