use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::Document;
use crate::locator::resolve;
use crate::siteconfig::SiteConfig;

/// Title used when no title locator matches
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Author used when no author locator matches
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Metadata describing one work, every field already defaulted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NovelMetadata {
    pub title: String,
    pub author: String,
    pub description: String,
    pub cover_url: String,
    pub novel_id: String,
    pub source_url: String,
}

impl Document {
    /// Extract the title, or [`UNKNOWN_TITLE`]
    pub fn extract_title(&self, config: &SiteConfig) -> String {
        or_default(resolve(self, &config.title, None), UNKNOWN_TITLE)
    }

    /// Extract the author name, or [`UNKNOWN_AUTHOR`]
    pub fn extract_author(&self, config: &SiteConfig) -> String {
        or_default(resolve(self, &config.author, None), UNKNOWN_AUTHOR)
    }

    /// Extract the work's description, or `""`
    pub fn extract_description(&self, config: &SiteConfig) -> String {
        resolve(self, &config.description, None)
    }

    /// Extract the cover image URL, or `""`
    ///
    /// The cover locators may reference the already-resolved `title`. A
    /// relative `src` is resolved against the document's location.
    pub fn extract_cover_url(&self, config: &SiteConfig, title: &str) -> String {
        let src = resolve(self, &config.cover.render(title), Some("src"));
        if src.is_empty() {
            return src;
        }

        match self.source_url() {
            Some(base) => base.join(&src).map(|url| url.to_string()).unwrap_or(src),
            None => src,
        }
    }

    /// Extract the work identifier from the document's location, or `""`
    pub fn extract_novel_id(&self, config: &SiteConfig) -> String {
        let pattern = config.novel_id_pattern();
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => {
                warn!(pattern, error = %e, "invalid novel id pattern");
                return String::new();
            }
        };

        regex
            .captures(self.source_url_str())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    /// Extract all metadata at once
    ///
    /// Title is resolved before the cover because cover locators may embed it.
    pub fn extract_metadata(&self, config: &SiteConfig) -> NovelMetadata {
        let title = self.extract_title(config);
        let cover_url = self.extract_cover_url(config, &title);

        let metadata = NovelMetadata {
            author: self.extract_author(config),
            description: self.extract_description(config),
            novel_id: self.extract_novel_id(config),
            source_url: self.source_url_str().to_string(),
            cover_url,
            title,
        };

        debug!(
            title = %metadata.title,
            author = %metadata.author,
            novel_id = %metadata.novel_id,
            has_description = !metadata.description.is_empty(),
            has_cover = !metadata.cover_url.is_empty(),
            "extracted metadata"
        );

        metadata
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() { default.to_string() } else { value }
}
