//! Ordered locator lists and the selector resolver.
//!
//! A locator is a CSS selector. Every configurable field carries a
//! [`LocatorList`] whose order is its priority: the first locator that matches
//! anything in the document wins and no further locators are tried.
//!
//! Locators that fail to parse are logged and skipped, never fatal.

use serde::Serialize;
use tracing::{debug, warn};

use crate::parse::{Document, Element};

/// Placeholder replaced by the already-resolved title in [`LocatorList::render`].
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// An ordered list of candidate locators, highest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocatorList(Vec<String>);

impl LocatorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, locator: impl Into<String>) {
        self.0.push(locator.into());
    }

    /// Appends every locator of `other` not already present, keeping order.
    pub fn extend_from(&mut self, other: &LocatorList) {
        for locator in &other.0 {
            if !self.0.contains(locator) {
                self.0.push(locator.clone());
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substitutes [`TITLE_PLACEHOLDER`] with `title`, escaped for use inside a
    /// double-quoted CSS attribute value.
    pub fn render(&self, title: &str) -> LocatorList {
        let escaped = escape_css_string(title);
        self.0.iter().map(|l| l.replace(TITLE_PLACEHOLDER, &escaped)).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for LocatorList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a LocatorList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn escape_css_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' | '\r' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Returns the first element matched by the highest-priority locator that
/// matches anything, together with that locator.
pub fn resolve_element<'d, 'l>(doc: &'d Document, locators: &'l LocatorList) -> Option<(Element<'d>, &'l str)> {
    for locator in locators.iter() {
        match doc.select_first(locator) {
            Ok(Some(element)) => {
                debug!(locator, "locator matched");
                return Some((element, locator));
            }
            Ok(None) => {}
            Err(e) => warn!(locator, error = %e, "skipping invalid locator"),
        }
    }
    None
}

/// Resolves a locator list to a string.
///
/// If `attribute` is given and present on the winning element its trimmed
/// value is returned, otherwise the element's trimmed text. Returns `""` when
/// nothing matches; callers supply their own default.
pub fn resolve(doc: &Document, locators: &LocatorList, attribute: Option<&str>) -> String {
    match resolve_element(doc, locators) {
        Some((element, _)) => match attribute.and_then(|name| element.attr(name)) {
            Some(value) => value.trim().to_string(),
            None => element.trimmed_text(),
        },
        None => String::new(),
    }
}
