use tracing::{debug, warn};

use crate::locator::resolve_element;
use crate::parse::{Document, Element};
use crate::siteconfig::SiteConfig;
use crate::{NovexError, Result};

/// Finds the single element holding the narrative body.
///
/// The `body` locators are tried most specific first. The first match wins;
/// candidates are never merged.
///
/// # Errors
///
/// Returns [`NovexError::NoContentContainerFound`] if no locator matches.
pub fn find_content_element<'d>(doc: &'d Document, config: &SiteConfig) -> Result<Element<'d>> {
    match resolve_element(doc, &config.body) {
        Some((element, locator)) => {
            debug!(locator, tag = %element.tag_name(), "found content container");
            Ok(element)
        }
        None => {
            warn!(locators = config.body.len(), "no content container locator matched");
            Err(NovexError::NoContentContainerFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::siteconfig::ConfigParser;

    #[test]
    fn test_specific_container_beats_main() {
        let html = r#"
            <main>
                <div class="sidebar">Ranking</div>
                <div class="sc-khIgEk novel-content" id="target"><p>Body</p></div>
            </main>
        "#;
        let doc = Document::parse(html);
        let element = find_content_element(&doc, &SiteConfig::builtin()).unwrap();

        assert_eq!(element.attr("id"), Some("target"));
    }

    #[test]
    fn test_main_is_last_resort() {
        let doc = Document::parse(r#"<body><nav>Menu</nav><main id="m"><span>Text</span></main></body>"#);
        let element = find_content_element(&doc, &SiteConfig::builtin()).unwrap();

        assert_eq!(element.tag_name(), "main");
    }

    #[test]
    fn test_first_match_only() {
        let html = r#"
            <div class="gtm-novel-work-content" id="first">One</div>
            <div class="gtm-novel-work-content" id="second">Two</div>
        "#;
        let doc = Document::parse(html);
        let element = find_content_element(&doc, &SiteConfig::builtin()).unwrap();

        assert_eq!(element.attr("id"), Some("first"));
    }

    #[test]
    fn test_no_container_found() {
        let doc = Document::parse("<html><body><div>Just a div</div></body></html>");
        let result = find_content_element(&doc, &SiteConfig::builtin());

        assert!(matches!(result, Err(NovexError::NoContentContainerFound)));
    }

    #[test]
    fn test_invalid_locators_fall_through() {
        let config = ConfigParser::parse_string("body: [[nope\nbody: section.story").unwrap();
        let doc = Document::parse(r#"<section class="story">Once</section>"#);

        assert_eq!(find_content_element(&doc, &config).unwrap().tag_name(), "section");
    }
}
