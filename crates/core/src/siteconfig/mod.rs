pub mod directives;
pub mod loader;
pub mod parser;

pub use directives::{DEFAULT_NOVEL_ID_PATTERN, Directive, SiteConfig};
pub use loader::{ConfigLoader, ConfigLoaderBuilder};
pub use parser::ConfigParser;

const BUILTIN_CONFIG: &str = include_str!("builtin.txt");

impl SiteConfig {
    /// The built-in locator lists for the default target site.
    pub fn builtin() -> Self {
        match ConfigParser::parse_string(BUILTIN_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "built-in site config failed to parse");
                SiteConfig::new()
            }
        }
    }

    /// This config followed by the built-in defaults, unless it opts out.
    ///
    /// Only locators and extraction settings are inherited; the built-in
    /// `url_pattern` and `test_url` entries describe the built-in site only.
    pub fn with_defaults(mut self) -> Self {
        if self.should_inherit_defaults() {
            let mut defaults = Self::builtin();
            defaults.url_patterns.clear();
            defaults.test_urls.clear();
            self.merge(&defaults);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parses() {
        let config = SiteConfig::builtin();

        assert!(!config.is_empty());
        assert_eq!(config.title.iter().next(), Some(r#"h1[class^="sc-"]"#));
        assert_eq!(config.body.iter().last(), Some("main"));
        assert!(config.cover.iter().any(|l| l.contains("{title}")));
        assert_eq!(config.structure_threshold, Some(5));
        assert_eq!(config.min_paragraph_chars, Some(5));
        assert!(config.supports_url("https://www.pixiv.net/novel/show.php?id=123"));
    }

    #[test]
    fn test_with_defaults_appends_builtin() {
        let custom = ConfigParser::parse_string("title: h1.mine\nbody: div.mine").unwrap().with_defaults();

        assert_eq!(custom.title.iter().next(), Some("h1.mine"));
        assert!(custom.title.iter().any(|l| l == "h1"));
        assert_eq!(custom.body.iter().next(), Some("div.mine"));
        assert_eq!(custom.body.iter().last(), Some("main"));
    }

    #[test]
    fn test_with_defaults_keeps_site_scope() {
        let custom = ConfigParser::parse_string("body: div.chapter").unwrap().with_defaults();

        assert!(custom.url_patterns.is_empty());
        assert!(custom.test_urls.is_empty());
        assert!(custom.supports_url("https://example.org/stories/9"));
    }

    #[test]
    fn test_with_defaults_respects_opt_out() {
        let custom = ConfigParser::parse_string("title: h1.mine\ninherit_defaults: no").unwrap().with_defaults();

        assert_eq!(custom.title.len(), 1);
        assert!(custom.body.is_empty());
    }
}
