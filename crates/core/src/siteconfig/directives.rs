use crate::error::{NovexError, Result};
use crate::locator::LocatorList;
use crate::reconstruct::{ReconstructConfig, Strategy};

/// Default novel-id pattern: the numeric `id` query parameter.
pub const DEFAULT_NOVEL_ID_PATTERN: &str = r"[?&]id=(\d+)";

/// Represents a single site config directive
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Locators, one per line, evaluated in order
    Title(String),
    Author(String),
    Description(String),
    Cover(String),
    Body(String),
    Paragraph(String),

    /// Regex whose first capture group is the work identifier
    NovelId(String),

    /// Paragraph reconstruction tuning
    StructureThreshold(usize),
    MinParagraphChars(usize),
    Strategy(Option<Strategy>),

    /// Substring a page location must contain to be supported
    UrlPattern(String),

    /// Whether built-in defaults are appended after this config's locators
    InheritDefaults(bool),

    /// Testing
    TestUrl(String),
}

/// Site configuration: the locator priority lists and tuning for one site
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteConfig {
    pub title: LocatorList,
    pub author: LocatorList,
    pub description: LocatorList,
    /// May contain the `{title}` placeholder
    pub cover: LocatorList,
    /// Content-container locators
    pub body: LocatorList,
    /// Paragraph-like element selectors
    pub paragraph: LocatorList,

    pub novel_id: Option<String>,

    pub structure_threshold: Option<usize>,
    pub min_paragraph_chars: Option<usize>,
    /// `None` means the strategy is chosen by probing the container
    pub strategy: Option<Strategy>,

    pub url_patterns: Vec<String>,
    pub inherit_defaults: Option<bool>,
    pub test_urls: Vec<String>,
}

impl SiteConfig {
    /// Create a new empty site config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directive to this config
    pub fn add_directive(&mut self, directive: Directive) {
        match directive {
            Directive::Title(locator) => self.title.push(locator),
            Directive::Author(locator) => self.author.push(locator),
            Directive::Description(locator) => self.description.push(locator),
            Directive::Cover(locator) => self.cover.push(locator),
            Directive::Body(locator) => self.body.push(locator),
            Directive::Paragraph(locator) => self.paragraph.push(locator),

            Directive::NovelId(pattern) => self.novel_id = Some(pattern),

            Directive::StructureThreshold(value) => self.structure_threshold = Some(value),
            Directive::MinParagraphChars(value) => self.min_paragraph_chars = Some(value),
            Directive::Strategy(strategy) => self.strategy = strategy,

            Directive::UrlPattern(pattern) => self.url_patterns.push(pattern),
            Directive::InheritDefaults(value) => self.inherit_defaults = Some(value),
            Directive::TestUrl(url) => self.test_urls.push(url),
        }
    }

    /// Merge a lower-priority config into this one.
    ///
    /// Locators from `other` are appended after this config's own, and scalar
    /// settings from `other` only fill values this config leaves unset.
    pub fn merge(&mut self, other: &SiteConfig) {
        self.title.extend_from(&other.title);
        self.author.extend_from(&other.author);
        self.description.extend_from(&other.description);
        self.cover.extend_from(&other.cover);
        self.body.extend_from(&other.body);
        self.paragraph.extend_from(&other.paragraph);

        if self.novel_id.is_none() {
            self.novel_id = other.novel_id.clone();
        }
        if self.structure_threshold.is_none() {
            self.structure_threshold = other.structure_threshold;
        }
        if self.min_paragraph_chars.is_none() {
            self.min_paragraph_chars = other.min_paragraph_chars;
        }
        if self.strategy.is_none() {
            self.strategy = other.strategy;
        }
        if self.url_patterns.is_empty() {
            self.url_patterns = other.url_patterns.clone();
        }
        if self.inherit_defaults.is_none() {
            self.inherit_defaults = other.inherit_defaults;
        }

        for url in &other.test_urls {
            if !self.test_urls.contains(url) {
                self.test_urls.push(url.clone());
            }
        }
    }

    /// Whether built-in defaults should be appended (default: true)
    pub fn should_inherit_defaults(&self) -> bool {
        self.inherit_defaults.unwrap_or(true)
    }

    /// Effective novel-id pattern
    pub fn novel_id_pattern(&self) -> &str {
        self.novel_id.as_deref().unwrap_or(DEFAULT_NOVEL_ID_PATTERN)
    }

    /// Paragraph reconstruction settings with defaults applied
    pub fn reconstruct_config(&self) -> ReconstructConfig {
        let defaults = ReconstructConfig::default();
        ReconstructConfig {
            structure_threshold: self.structure_threshold.unwrap_or(defaults.structure_threshold),
            min_paragraph_chars: self.min_paragraph_chars.unwrap_or(defaults.min_paragraph_chars),
            strategy: self.strategy,
        }
    }

    /// Whether `url` is a page this config is meant for.
    ///
    /// A config without URL patterns supports every page.
    pub fn supports_url(&self, url: &str) -> bool {
        self.url_patterns.is_empty() || self.url_patterns.iter().any(|pattern| url.contains(pattern.as_str()))
    }

    /// Check if this config is effectively empty
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.author.is_empty()
            && self.description.is_empty()
            && self.cover.is_empty()
            && self.body.is_empty()
            && self.paragraph.is_empty()
            && self.novel_id.is_none()
            && self.structure_threshold.is_none()
            && self.min_paragraph_chars.is_none()
            && self.strategy.is_none()
            && self.url_patterns.is_empty()
    }
}

/// Parse a directive line of the form `key: value`
pub fn parse_directive(line: &str) -> Result<Directive> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Err(NovexError::SiteConfigError("Empty or comment line".to_string()));
    }

    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| NovexError::SiteConfigError(format!("Invalid directive format: {}", line)))?;
    let key = key.trim();
    let value = value.trim();

    if value.is_empty() {
        return Err(NovexError::SiteConfigError(format!("Missing value for directive: {}", key)));
    }

    match key {
        "title" => Ok(Directive::Title(value.to_string())),
        "author" => Ok(Directive::Author(value.to_string())),
        "description" => Ok(Directive::Description(value.to_string())),
        "cover" => Ok(Directive::Cover(value.to_string())),
        "body" => Ok(Directive::Body(value.to_string())),
        "paragraph" => Ok(Directive::Paragraph(value.to_string())),

        "novel_id" => {
            regex::Regex::new(value)
                .map_err(|e| NovexError::SiteConfigError(format!("Invalid novel_id pattern {}: {}", value, e)))?;
            Ok(Directive::NovelId(value.to_string()))
        }

        "structure_threshold" => Ok(Directive::StructureThreshold(parse_count(key, value)?)),
        "min_paragraph_chars" => Ok(Directive::MinParagraphChars(parse_count(key, value)?)),
        "strategy" => Ok(Directive::Strategy(parse_strategy(value)?)),

        "url_pattern" => Ok(Directive::UrlPattern(value.to_string())),
        "inherit_defaults" => Ok(Directive::InheritDefaults(parse_boolean(value)?)),
        "test_url" => Ok(Directive::TestUrl(value.to_string())),

        _ => Err(NovexError::SiteConfigError(format!("Unknown directive: {}", key))),
    }
}

/// Parse a boolean value
fn parse_boolean(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" => Ok(false),
        _ => Err(NovexError::SiteConfigError(format!("Invalid boolean value: {}", value))),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| NovexError::SiteConfigError(format!("Invalid number for {}: {}", key, value)))
}

/// Parse a strategy name; `auto` means no override
fn parse_strategy(value: &str) -> Result<Option<Strategy>> {
    Strategy::parse_choice(&value.to_lowercase()).map_err(NovexError::SiteConfigError)
}
