//! Error types for Novex operations.
//!
//! This module defines the main error type [`NovexError`]. Only two of its
//! variants are extraction failures in the strict sense:
//! [`NovexError::NoContentContainerFound`] and [`NovexError::EmptyContent`].
//! Everything else comes from acquiring input, loading site configuration
//! or writing output.
//!
//! # Example
//!
//! ```rust
//! use novex_core::{NovexError, Result};
//!
//! fn require_body(text: &str) -> Result<&str> {
//!     if text.trim().is_empty() {
//!         return Err(NovexError::EmptyContent);
//!     }
//!     Ok(text)
//! }
//! # assert!(require_body("  ").is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for extraction and export operations.
///
/// # Example
///
/// ```rust,no_run
/// use novex_core::{NovexError, extract};
///
/// match extract("<html>...</html>", "https://www.pixiv.net/novel/show.php?id=1") {
///     Ok(record) => println!("Extracted: {}", record.title()),
///     Err(NovexError::NoContentContainerFound) => println!("Page has not finished loading?"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum NovexError {
    /// No element matched any of the content-container locators.
    ///
    /// This is the one point where the pipeline has no default to fall back on.
    #[error("No content container found in the document")]
    NoContentContainerFound,

    /// The container was found but every strategy, including the last-resort
    /// full-text fallback, produced empty text.
    #[error("Extracted content is empty")]
    EmptyContent,

    /// A locator could not be parsed as a CSS selector.
    ///
    /// The selector resolver recovers from this locally; it only reaches
    /// callers of the lower-level [`crate::Document::select`] API.
    #[error("Invalid locator `{locator}`: {reason}")]
    InvalidLocator { locator: String, reason: String },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request errors from reqwest.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// Site configuration errors.
    ///
    /// Returned when a site configuration file cannot be read or contains
    /// an unknown directive or malformed value.
    #[error("Site configuration error: {0}")]
    SiteConfigError(String),

    /// Record serialization errors.
    #[error("Failed to serialize record: {0}")]
    SerializeError(String),
}

impl From<serde_json::Error> for NovexError {
    fn from(err: serde_json::Error) -> Self {
        NovexError::SerializeError(err.to_string())
    }
}

/// Result type alias for NovexError.
pub type Result<T> = std::result::Result<T, NovexError>;
