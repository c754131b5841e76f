use crate::error::{NovexError, Result};
use crate::siteconfig::directives::{SiteConfig, parse_directive};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Site config file parser
#[derive(Debug)]
pub struct ConfigParser;

impl ConfigParser {
    /// Parse a single site config file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
        let file = std::fs::File::open(&path).map_err(|e| {
            NovexError::SiteConfigError(format!("Cannot open file {}: {}", path.as_ref().display(), e))
        })?;

        let reader = BufReader::new(file);
        Self::parse_reader(reader)
    }

    /// Parse site config from a reader
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<SiteConfig> {
        let mut config = SiteConfig::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line =
                line.map_err(|e| NovexError::SiteConfigError(format!("Read error at line {}: {}", line_number, e)))?;
            Self::parse_line(&mut config, &line, line_number)?;
        }

        Ok(config)
    }

    /// Parse site config from a string
    pub fn parse_string(content: &str) -> Result<SiteConfig> {
        let mut config = SiteConfig::new();

        for (index, line) in content.lines().enumerate() {
            Self::parse_line(&mut config, line, index + 1)?;
        }

        Ok(config)
    }

    fn parse_line(config: &mut SiteConfig, line: &str, line_number: usize) -> Result<()> {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        match parse_directive(line) {
            Ok(directive) => {
                config.add_directive(directive);
                Ok(())
            }
            Err(e) => Err(NovexError::SiteConfigError(format!(
                "Parse error at line {}: {}",
                line_number, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct::Strategy;
    use std::io::Cursor;

    #[test]
    fn test_parse_string_basic() {
        let content = r#"
# Example config
title: h1.work-title
body: div#novel-body
paragraph: p
structure_threshold: 3
inherit_defaults: no
"#;

        let config = ConfigParser::parse_string(content).unwrap();

        assert_eq!(config.title.len(), 1);
        assert_eq!(config.body.len(), 1);
        assert_eq!(config.paragraph.len(), 1);
        assert_eq!(config.structure_threshold, Some(3));
        assert_eq!(config.inherit_defaults, Some(false));

        assert_eq!(config.title.iter().next(), Some("h1.work-title"));
        assert_eq!(config.body.iter().next(), Some("div#novel-body"));
    }

    #[test]
    fn test_parse_string_multiple_directives() {
        let content = r#"
title: h1[class^="sc-"]
title: h1
body: div[class*="novel-content"]
body: main
cover: img[alt*="{title}"]
strategy: structured
"#;

        let config = ConfigParser::parse_string(content).unwrap();

        assert_eq!(config.title.len(), 2);
        assert_eq!(config.body.len(), 2);
        assert_eq!(config.cover.iter().next(), Some(r#"img[alt*="{title}"]"#));
        assert_eq!(config.strategy, Some(Strategy::Structured));
    }

    #[test]
    fn test_parse_reader() {
        let content = r#"
title: h1
body: article
"#;

        let cursor = Cursor::new(content);
        let config = ConfigParser::parse_reader(cursor).unwrap();

        assert_eq!(config.title.len(), 1);
        assert_eq!(config.body.len(), 1);
    }

    #[test]
    fn test_parse_invalid_directive_reports_line() {
        let content = "title: h1\n\ninvalid_directive_without_colon";

        let err = ConfigParser::parse_string(content).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_parse_empty_and_comments() {
        let content = r#"
# This is a comment
# Another comment

author: a[href^="/users/"]

# Final comment
"#;

        let config = ConfigParser::parse_string(content).unwrap();

        assert_eq!(config.author.len(), 1);
        assert!(config.title.is_empty());
    }

    #[test]
    fn test_parse_file_missing() {
        let result = ConfigParser::parse_file("/nonexistent/site.txt");
        assert!(matches!(result, Err(NovexError::SiteConfigError(_))));
    }
}
