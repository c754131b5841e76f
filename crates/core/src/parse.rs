//! HTML parsing and DOM access.
//!
//! This module provides the [`Document`] and [`Element`] types. A `Document`
//! plays the role of "the current page": the parsed markup plus the location
//! it was captured from.
//!
//! # Example
//!
//! ```rust
//! use novex_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let paragraphs = doc.select("p.content").unwrap();
//! assert_eq!(paragraphs.len(), 1);
//! ```

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{NovexError, Result};

/// Compiles a locator into a CSS selector.
///
/// # Errors
///
/// Returns [`NovexError::InvalidLocator`] if the locator is not valid CSS.
pub(crate) fn compile_selector(locator: &str) -> Result<Selector> {
    Selector::parse(locator)
        .map_err(|e| NovexError::InvalidLocator { locator: locator.to_string(), reason: e.to_string() })
}

/// Represents a parsed HTML document and the location it came from.
///
/// # Example
///
/// ```rust
/// use novex_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse_with_url(html, "https://www.pixiv.net/novel/show.php?id=42").unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// assert_eq!(doc.source_url().map(|u| u.as_str()), Some("https://www.pixiv.net/novel/show.php?id=42"));
/// ```
pub struct Document {
    html: Html,
    source_url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string with no known location.
    ///
    /// HTML parsing is error-tolerant, so this never fails.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html), source_url: None }
    }

    /// Parses HTML captured from `url`.
    ///
    /// # Errors
    ///
    /// Returns [`NovexError::InvalidUrl`] if `url` cannot be parsed.
    pub fn parse_with_url(html: &str, url: &str) -> Result<Self> {
        let source_url = Url::parse(url).map_err(|e| NovexError::InvalidUrl(format!("{}: {}", url, e)))?;
        Ok(Self { html: Html::parse_document(html), source_url: Some(source_url) })
    }

    /// Gets the page location, if one was provided.
    pub fn source_url(&self) -> Option<&Url> {
        self.source_url.as_ref()
    }

    /// Gets the page location as a string, or `""` when unknown.
    pub fn source_url_str(&self) -> &str {
        self.source_url.as_ref().map(Url::as_str).unwrap_or_default()
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`NovexError::InvalidLocator`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.html.select(&sel).map(Element::new).collect())
    }

    /// Selects the first element in document order matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`NovexError::InvalidLocator`] if the selector is invalid.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.html.select(&sel).next().map(Element::new))
    }

    /// Gets the content of the `<title>` element, if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    /// Gets all text content from the document.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }
}

/// A wrapper around scraper's `ElementRef`.
///
/// Handles are only valid while the owning [`Document`] is borrowed; they are
/// never stored past the extraction call that produced them.
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    pub(crate) fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// The underlying scraper handle.
    pub(crate) fn element_ref(&self) -> ElementRef<'a> {
        self.element
    }

    /// Gets the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text content with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name (e.g. "div", "p").
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`NovexError::InvalidLocator`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile_selector(selector)?;
        Ok(self.element.select(&sel).map(Element::new).collect())
    }
}
