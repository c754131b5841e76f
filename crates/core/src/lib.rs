pub mod content;
pub mod error;
pub mod exporter;
pub mod fetch;
pub mod formatters;
pub mod locator;
pub mod metadata;
pub mod normalize;
pub mod parse;
pub mod reconstruct;
pub mod record;
pub mod siteconfig;

pub use content::find_content_element;
pub use error::{NovexError, Result};
pub use exporter::{Exporter, ExporterBuilder, extract, extract_with_config, extract_with_site_config};
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{fetch_file, fetch_stdin};
pub use formatters::{
    ExportFormat, HtmlConfig, HtmlFormatter, JsonConfig, JsonFormatter, RenderConfig, TextConfig, TextFormatter,
};
pub use formatters::{
    convert_to_html, convert_to_json, convert_to_text, export_filename, render, sanitize_filename, write_export,
};
pub use locator::{LocatorList, TITLE_PLACEHOLDER};
pub use metadata::{NovelMetadata, UNKNOWN_AUTHOR, UNKNOWN_TITLE};
pub use normalize::clean_content;
pub use parse::{Document, Element};
pub use reconstruct::{ParagraphMatcher, ReconstructConfig, Reconstruction, Strategy, choose_strategy, extract_text};
pub use record::ExportRecord;
pub use siteconfig::{ConfigLoader, ConfigLoaderBuilder, ConfigParser, Directive, SiteConfig};
