//! Text normalization for reconstructed body text.
//!
//! The output never contains invisible zero-width characters, leading or
//! trailing whitespace on any line, or more than one blank line in a row.
//! Normalizing already-normalized text is a no-op.

use std::sync::LazyLock;

use regex::Regex;

static INVISIBLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{200B}-\u{200D}\u{2060}\u{FEFF}]").expect("valid invisible-char regex"));

static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank-run regex"));

/// Normalizes raw body text.
///
/// Empty input yields empty output; callers decide whether that is an error.
pub fn clean_content(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = INVISIBLE_RE.replace_all(&text, "");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");

    let text = text.split('\n').map(str::trim).collect::<Vec<_>>().join("\n");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a\n\n\n\n\nb", "a\n\nb")]
    #[case("a\n\nb", "a\n\nb")]
    #[case("a\nb", "a\nb")]
    #[case("  a  \n   b\t", "a\nb")]
    #[case("a\n   \n \n\nb", "a\n\nb")]
    #[case("\u{FEFF}a\u{200B}b\u{200C}c\u{200D}d\u{2060}", "abcd")]
    #[case("\n\n  title  \n\n\n", "title")]
    #[case("a\r\n\r\n\r\nb\rc", "a\n\nb\nc")]
    #[case("\u{3000}\u{3000}全角の字下げ", "全角の字下げ")]
    #[case("", "")]
    #[case("   \n\n  ", "")]
    fn test_clean_content(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(clean_content(raw), expected);
    }

    #[test]
    fn test_zero_width_lines_become_blank_and_collapse() {
        let raw = "first\n\u{200B}\n\u{FEFF}\n\nsecond";
        assert_eq!(clean_content(raw), "first\n\nsecond");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "a\n\n\n\n\nb",
            "  line one \n\n\n line two\n\u{200B}\n\n\nline three  ",
            "x\r\n \r\n \r\ny",
            "plain",
        ];
        for raw in inputs {
            let once = clean_content(raw);
            assert_eq!(clean_content(&once), once, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_never_three_newlines() {
        let raw = "a\n \n \n \n\u{200B}\n\t\nb\n\n\n\n\nc \n \n\n d";
        let cleaned = clean_content(raw);
        assert!(!cleaned.contains("\n\n\n"), "{:?}", cleaned);
        assert_eq!(cleaned, "a\n\nb\n\nc\n\nd");
    }
}
