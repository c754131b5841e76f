//! The export record handed to serialization.
//!
//! An [`ExportRecord`] can only be built through [`ExportRecord::assemble`],
//! which refuses empty content. Once built it is read-only.

use serde::{Serialize, Serializer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::metadata::NovelMetadata;
use crate::{NovexError, Result};

/// One extracted work: metadata plus normalized body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    title: String,
    author: String,
    description: String,
    cover_url: String,
    novel_id: String,
    source_url: String,
    content: String,
    #[serde(serialize_with = "serialize_rfc3339")]
    extracted_at: OffsetDateTime,
}

impl ExportRecord {
    /// Merges metadata and normalized content into a record stamped with the
    /// current time.
    ///
    /// # Errors
    ///
    /// Returns [`NovexError::EmptyContent`] if `content` is empty after trimming.
    pub fn assemble(metadata: NovelMetadata, content: String) -> Result<Self> {
        Self::assemble_at(metadata, content, OffsetDateTime::now_utc())
    }

    /// Like [`ExportRecord::assemble`] with an explicit timestamp.
    pub fn assemble_at(metadata: NovelMetadata, content: String, extracted_at: OffsetDateTime) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(NovexError::EmptyContent);
        }

        let NovelMetadata { title, author, description, cover_url, novel_id, source_url } = metadata;
        Ok(Self { title, author, description, cover_url, novel_id, source_url, content, extracted_at })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Empty when the page has no description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Empty when no cover image was found
    pub fn cover_url(&self) -> &str {
        &self.cover_url
    }

    /// Empty when the location carries no identifier
    pub fn novel_id(&self) -> &str {
        &self.novel_id
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Body text, paragraphs separated by a blank line
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn extracted_at(&self) -> OffsetDateTime {
        self.extracted_at
    }

    /// Paragraphs of the body in order
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content.split("\n\n").map(str::trim).filter(|p| !p.is_empty())
    }
}

fn serialize_rfc3339<S: Serializer>(value: &OffsetDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let formatted = value.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}
