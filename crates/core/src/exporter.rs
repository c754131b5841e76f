//! Main extraction API.
//!
//! The entry point is the [`Exporter`] struct, along with the convenience
//! functions [`extract`] and [`extract_with_config`].
//!
//! One call runs the whole pipeline synchronously against a freshly parsed
//! document:
//!
//! 1. locate the content container
//! 2. reconstruct paragraphs from it
//! 3. normalize the text
//! 4. extract metadata
//! 5. assemble the [`ExportRecord`]
//!
//! # Example
//!
//! ```rust
//! use novex_core::extract;
//!
//! let html = r#"<main><p>Once upon a time.</p></main>"#;
//! let record = extract(html, "https://www.pixiv.net/novel/show.php?id=7").unwrap();
//! assert_eq!(record.content(), "Once upon a time.");
//! assert_eq!(record.novel_id(), "7");
//! ```

use tracing::{debug, info_span};

use crate::content::find_content_element;
use crate::normalize::clean_content;
use crate::parse::Document;
use crate::reconstruct::{ParagraphMatcher, extract_text};
use crate::record::ExportRecord;
use crate::siteconfig::{ConfigLoader, SiteConfig};
use crate::{NovexError, Result};

#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_url};

/// Runs the extraction pipeline with a fixed or per-URL site configuration.
///
/// # Example
///
/// ```rust
/// use novex_core::{ConfigParser, Exporter};
///
/// let site = ConfigParser::parse_string("body: section.story\ninherit_defaults: no").unwrap();
/// let exporter = Exporter::builder().site_config(site).build();
/// let record = exporter
///     .extract(r#"<section class="story">Hello there.</section>"#, "https://example.org/s/1")
///     .unwrap();
/// assert_eq!(record.content(), "Hello there.");
/// ```
#[derive(Debug, Clone)]
pub struct Exporter {
    site_config: SiteConfig,
    config_loader: Option<ConfigLoader>,
}

impl Exporter {
    /// Creates an exporter using the built-in site configuration.
    pub fn new() -> Self {
        Self { site_config: SiteConfig::builtin(), config_loader: None }
    }

    /// Creates an exporter using `site_config` as-is.
    pub fn with_site_config(site_config: SiteConfig) -> Self {
        Self { site_config, config_loader: None }
    }

    /// Creates a builder.
    pub fn builder() -> ExporterBuilder {
        ExporterBuilder::new()
    }

    /// The site configuration used when no loader is set or the document has
    /// no location.
    pub fn site_config(&self) -> &SiteConfig {
        &self.site_config
    }

    /// Effective site configuration for a document at `url`.
    ///
    /// Config files are read on every call; the exporter keeps no state
    /// between extractions. Use [`ConfigLoader::resolve_for_url`] directly
    /// for cached lookups.
    pub fn site_config_for(&self, url: Option<&str>) -> SiteConfig {
        if let (Some(loader), Some(url)) = (self.config_loader.as_ref(), url) {
            match loader.read_for_url(url) {
                Ok(config) => return config,
                Err(e) => debug!(url, error = %e, "site config lookup failed, using default"),
            }
        }
        self.site_config.clone()
    }

    /// Parses `html` captured at `url` and extracts an export record.
    ///
    /// # Errors
    ///
    /// Returns [`NovexError::InvalidUrl`] for a malformed `url`,
    /// [`NovexError::NoContentContainerFound`] or [`NovexError::EmptyContent`].
    pub fn extract(&self, html: &str, url: &str) -> Result<ExportRecord> {
        let doc = Document::parse_with_url(html, url)?;
        self.extract_document(&doc)
    }

    /// Extracts an export record from an already parsed document.
    pub fn extract_document(&self, doc: &Document) -> Result<ExportRecord> {
        let source = doc.source_url().map(|u| u.to_string());
        let config = self.site_config_for(source.as_deref());
        extract_with_site_config(doc, &config)
    }

    /// Fetches `url` and extracts an export record from the response.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_extract(&self, url: &str, fetch_config: &FetchConfig) -> Result<ExportRecord> {
        let html = fetch_url(url, fetch_config).await?;
        self.extract(&html, url)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Exporter`].
#[derive(Debug, Default)]
pub struct ExporterBuilder {
    site_config: Option<SiteConfig>,
    config_loader: Option<ConfigLoader>,
}

impl ExporterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback site configuration (default: built-in).
    pub fn site_config(mut self, site_config: SiteConfig) -> Self {
        self.site_config = Some(site_config);
        self
    }

    /// Looks up per-domain config files for every document with a location.
    pub fn loader(mut self, loader: ConfigLoader) -> Self {
        self.config_loader = Some(loader);
        self
    }

    pub fn build(self) -> Exporter {
        Exporter {
            site_config: self.site_config.unwrap_or_else(SiteConfig::builtin),
            config_loader: self.config_loader,
        }
    }
}

/// Runs the pipeline over `doc` with an explicit site configuration.
pub fn extract_with_site_config(doc: &Document, config: &SiteConfig) -> Result<ExportRecord> {
    let span = info_span!("extract", url = doc.source_url_str());
    let _guard = span.enter();

    let container = find_content_element(doc, config)?;

    let matcher = ParagraphMatcher::new(&config.paragraph);
    let reconstruction = extract_text(container, &matcher, &config.reconstruct_config());
    let content = clean_content(&reconstruction.text);
    debug!(
        strategy = %reconstruction.strategy,
        used_fallback = reconstruction.used_fallback,
        chars = content.chars().count(),
        "reconstructed content"
    );

    if content.is_empty() {
        return Err(NovexError::EmptyContent);
    }

    let metadata = doc.extract_metadata(config);
    ExportRecord::assemble(metadata, content)
}

/// Extracts a record from `html` captured at `url` with the built-in configuration.
pub fn extract(html: &str, url: &str) -> Result<ExportRecord> {
    Exporter::new().extract(html, url)
}

/// Extracts a record from `html` captured at `url` with `config`.
pub fn extract_with_config(html: &str, url: &str, config: SiteConfig) -> Result<ExportRecord> {
    Exporter::with_site_config(config).extract(html, url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::UNKNOWN_TITLE;
    use crate::siteconfig::{ConfigLoaderBuilder, ConfigParser};
    use std::fs;
    use tempfile::TempDir;

    const URL: &str = "https://www.pixiv.net/novel/show.php?id=100";

    fn page(body: &str) -> String {
        format!(
            r#"<html><body><main><h1 class="sc-title">The Lighthouse</h1>
               <a href="/users/1">Keeper</a>
               <div class="sc-abc novel-content">{}</div></main></body></html>"#,
            body
        )
    }

    #[test]
    fn test_extract_structured_page() {
        let body: String = (1..=10).map(|i| format!("<p>Line number {} of the story.</p>", i)).collect();
        let record = extract(&page(&body), URL).unwrap();

        assert_eq!(record.title(), "The Lighthouse");
        assert_eq!(record.author(), "Keeper");
        assert_eq!(record.novel_id(), "100");
        assert_eq!(record.paragraphs().count(), 10);
    }

    #[test]
    fn test_extract_text_walk_page() {
        let body = "First sentence.<br><br><br><br>\u{200B}Second sentence.<br>Third sentence.";
        let record = extract(&page(body), URL).unwrap();

        assert_eq!(record.content(), "First sentence.\nSecond sentence.\nThird sentence.");
    }

    #[test]
    fn test_no_container() {
        let result = extract("<html><body><div>Loading...</div></body></html>", URL);
        assert!(matches!(result, Err(NovexError::NoContentContainerFound)));
    }

    #[test]
    fn test_whitespace_only_container() {
        let result = extract(&page("<p>  </p><span>\u{200B}</span>"), URL);
        assert!(matches!(result, Err(NovexError::EmptyContent)));
    }

    #[test]
    fn test_invalid_url() {
        let result = extract(&page("<p>text</p>"), "::not a url::");
        assert!(matches!(result, Err(NovexError::InvalidUrl(_))));
    }

    #[test]
    fn test_missing_title_is_not_fatal() {
        let html = r#"<main><p>Untitled but present.</p></main>"#;
        let record = extract(html, URL).unwrap();
        assert_eq!(record.title(), UNKNOWN_TITLE);
    }

    #[test]
    fn test_custom_config_without_defaults() {
        let site = ConfigParser::parse_string("body: #reader\ninherit_defaults: no").unwrap();
        let html = r#"<main><p>Not this</p></main><div id="reader">But this one.</div>"#;

        let record = extract_with_config(html, URL, site).unwrap();
        assert_eq!(record.content(), "But this one.");
        assert_eq!(record.author(), crate::metadata::UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_site_config_changes_are_picked_up_between_calls() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("example.org.txt");
        fs::write(&config_path, "body: section.one\n").unwrap();
        let loader = ConfigLoaderBuilder::new().custom_dir(temp_dir.path()).build();
        let exporter = Exporter::builder().loader(loader).build();

        let html = r#"<section class="one">First body.</section><section class="two">Second body.</section>"#;
        let url = "https://example.org/story/1";
        assert_eq!(exporter.extract(html, url).unwrap().content(), "First body.");

        fs::write(&config_path, "body: section.two\n").unwrap();
        assert_eq!(exporter.extract(html, url).unwrap().content(), "Second body.");
    }

    #[test]
    fn test_extract_with_site_config_on_parsed_document() {
        let site = ConfigParser::parse_string("body: #reader\ninherit_defaults: no").unwrap();
        let doc = Document::parse(r#"<div id="reader">Pre-parsed text.</div>"#);

        let record = extract_with_site_config(&doc, &site).unwrap();
        assert_eq!(record.content(), "Pre-parsed text.");
        assert_eq!(record.source_url(), "");
    }

    #[test]
    fn test_loader_config_is_used_per_domain() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("example.org.txt"), "body: article.chapter\n").unwrap();
        let loader = ConfigLoaderBuilder::new().custom_dir(temp_dir.path()).build();
        let exporter = Exporter::builder().loader(loader).build();

        let html = r#"<main>Menu</main><article class="chapter">Chapter text here.</article>"#;
        let record = exporter.extract(html, "https://example.org/story/1").unwrap();
        assert_eq!(record.content(), "Chapter text here.");

        let fallback = exporter.extract(html, URL).unwrap();
        assert_eq!(fallback.content(), "Menu");
    }
}
