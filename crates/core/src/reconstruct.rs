//! Paragraph reconstruction from a content container.
//!
//! Pages either expose real paragraph structure (many `<p>`/heading-like
//! elements) or render the body as loosely nested text. A structural probe
//! picks exactly one [`Strategy`] per call:
//!
//! - [`Strategy::Structured`] harvests paragraph-like elements, drops short
//!   noise entries and repeats, and joins them with a blank line.
//! - [`Strategy::TextWalk`] visits every text node in document order and
//!   joins them with a single newline.
//!
//! If the chosen strategy yields nothing, the container's full text is used.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use scraper::{ElementRef, Selector};
use serde::Serialize;
use tracing::{debug, warn};

use crate::locator::LocatorList;
use crate::normalize::clean_content;
use crate::parse::{Element, compile_selector};

/// Which reconstruction variant produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Harvest paragraph-like elements, deduplicated
    Structured,
    /// Walk raw text nodes
    TextWalk,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Structured => write!(f, "structured"),
            Strategy::TextWalk => write!(f, "text"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "structured" | "paragraphs" => Ok(Self::Structured),
            "text" | "text_walk" | "textwalk" => Ok(Self::TextWalk),
            _ => Err(format!("Invalid strategy: {}. Valid options: structured, text", s)),
        }
    }
}

impl Strategy {
    /// Parses `auto|structured|text`; `auto` yields `None` (probe the container).
    pub fn parse_choice(s: &str) -> Result<Option<Self>, String> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(None);
        }
        s.trim()
            .parse()
            .map(Some)
            .map_err(|_| format!("Invalid strategy: {}. Valid options: auto, structured, text", s))
    }
}

/// Tuning for paragraph reconstruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructConfig {
    /// Structured strategy is used when the paragraph-like count exceeds this
    pub structure_threshold: usize,
    /// Harvested entries with this many characters or fewer are dropped
    pub min_paragraph_chars: usize,
    /// Forces a strategy instead of probing
    pub strategy: Option<Strategy>,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self { structure_threshold: 5, min_paragraph_chars: 5, strategy: None }
    }
}

/// Compiled set of paragraph-like selectors.
#[derive(Debug, Clone, Default)]
pub struct ParagraphMatcher {
    selectors: Vec<Selector>,
}

impl ParagraphMatcher {
    /// Compiles every locator, skipping (and logging) invalid ones.
    pub fn new(locators: &LocatorList) -> Self {
        let selectors = locators
            .iter()
            .filter_map(|locator| match compile_selector(locator) {
                Ok(selector) => Some(selector),
                Err(e) => {
                    warn!(locator, error = %e, "skipping invalid paragraph locator");
                    None
                }
            })
            .collect();
        Self { selectors }
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    fn matches(&self, element: &ElementRef<'_>) -> bool {
        self.selectors.iter().any(|selector| selector.matches(element))
    }

    /// Paragraph-like descendants of `container` in document order.
    fn elements<'a>(&self, container: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        if self.is_empty() {
            return Vec::new();
        }
        container
            .descendants()
            .filter(|node| node.id() != container.id())
            .filter_map(ElementRef::wrap)
            .filter(|element| self.matches(element))
            .collect()
    }
}

/// Output of [`extract_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    pub strategy: Strategy,
    /// Whether the container's full text had to be used
    pub used_fallback: bool,
    pub text: String,
}

/// Counts paragraph-like elements inside `container`.
pub fn count_paragraph_like(container: Element<'_>, matcher: &ParagraphMatcher) -> usize {
    matcher.elements(container.element_ref()).len()
}

/// Picks the reconstruction strategy for `container`.
pub fn choose_strategy(container: Element<'_>, matcher: &ParagraphMatcher, config: &ReconstructConfig) -> Strategy {
    if let Some(forced) = config.strategy {
        return forced;
    }
    let count = count_paragraph_like(container, matcher);
    let strategy = if count > config.structure_threshold { Strategy::Structured } else { Strategy::TextWalk };
    debug!(count, threshold = config.structure_threshold, %strategy, "probed paragraph structure");
    strategy
}

/// Structured harvest: normalized text of each paragraph-like element, short
/// entries dropped, repeats removed, joined with a blank line.
///
/// Entries are compared after normalization, so two paragraphs differing only
/// in invisible characters or edge whitespace count as one.
pub fn harvest_paragraphs(container: Element<'_>, matcher: &ParagraphMatcher, min_chars: usize) -> String {
    let mut seen = HashSet::new();
    let mut paragraphs = Vec::new();

    for element in matcher.elements(container.element_ref()) {
        let text = clean_content(&element.text().collect::<String>());
        if text.chars().count() <= min_chars {
            continue;
        }
        if seen.insert(text.clone()) {
            paragraphs.push(text);
        }
    }

    paragraphs.join("\n\n")
}

/// Text-node walk: every non-blank text node outside `script`/`style`,
/// trimmed, joined with a newline.
pub fn walk_text_nodes(container: Element<'_>) -> String {
    container
        .element_ref()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let in_code = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .is_some_and(|parent| matches!(parent.name(), "script" | "style"));
            if in_code {
                return None;
            }
            let trimmed = text.trim();
            if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reconstructs the raw body text of `container`.
pub fn extract_text(container: Element<'_>, matcher: &ParagraphMatcher, config: &ReconstructConfig) -> Reconstruction {
    let strategy = choose_strategy(container, matcher, config);

    let text = match strategy {
        Strategy::Structured => harvest_paragraphs(container, matcher, config.min_paragraph_chars),
        Strategy::TextWalk => walk_text_nodes(container),
    };

    if text.is_empty() {
        debug!(%strategy, "strategy produced no text, using full container text");
        return Reconstruction { strategy, used_fallback: true, text: container.trimmed_text() };
    }

    Reconstruction { strategy, used_fallback: false, text }
}
