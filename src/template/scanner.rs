//! Extraction of raw `{{...}}` transclusions from wikitext

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use super::lexer::{lex, Token};

fn html_comment() -> &'static Regex {
    static HTML_COMMENT: OnceLock<Regex> = OnceLock::new();
    HTML_COMMENT.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment pattern"))
}

/// Remove every `<!-- ... -->` comment, matching non-greedily
pub fn remove_html_comments(text: &str) -> Cow<'_, str> {
    html_comment().replace_all(text, "")
}

/// Scanner position relative to template nesting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Not inside any template
    Outside,
    /// Inside a template that opened at `start`
    Inside { start: usize, level: usize },
}

/// Find every top-level template transclusion in `text`
///
/// Templates are returned in order of their opening braces. Nested
/// templates belong to their enclosing template and are not reported
/// separately. HTML comments are removed first, and `<nowiki>` regions
/// never change the nesting level. A `<nowiki>` without its closing tag
/// stops the scan; an unterminated template at the end is dropped.
pub fn scan(text: &str) -> Vec<String> {
    let text = remove_html_comments(text);
    let mut templates = Vec::new();
    let mut state = ScanState::Outside;
    let mut in_nowiki = false;

    for (token, span) in lex(&text) {
        if in_nowiki {
            if token == Token::ClosingNowiki {
                in_nowiki = false;
            }
            continue;
        }

        state = match (state, token) {
            (_, Token::OpeningNowiki) => {
                in_nowiki = true;
                state
            }
            (ScanState::Outside, Token::OpeningBraces) => ScanState::Inside {
                start: span.start,
                level: 1,
            },
            (ScanState::Inside { start, level }, Token::OpeningBraces) => ScanState::Inside {
                start,
                level: level + 1,
            },
            (ScanState::Inside { start, level: 1 }, Token::ClosingBraces) => {
                templates.push(text[start..span.end].to_string());
                ScanState::Outside
            }
            (ScanState::Inside { start, level }, Token::ClosingBraces) => ScanState::Inside {
                start,
                level: level - 1,
            },
            (state, _) => state,
        };
    }

    templates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_single_template() {
        assert_eq!(scan("before {{A|b=c}} after"), vec!["{{A|b=c}}"]);
    }

    #[test]
    fn test_scan_multiple_templates_in_order() {
        assert_eq!(
            scan("{{Constraint:Single value}}\n* {{Constraint:Format|pattern=\\d+}}"),
            vec!["{{Constraint:Single value}}", "{{Constraint:Format|pattern=\\d+}}"]
        );
    }

    #[test]
    fn test_scan_nested_template_is_one() {
        assert_eq!(scan("{{A|{{B}}}}"), vec!["{{A|{{B}}}}"]);
    }

    #[test]
    fn test_scan_nowiki_is_opaque() {
        let found = scan("{{A|<nowiki>{{not a template}}</nowiki>}}");
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("{{not a template}}"));
    }

    #[test]
    fn test_scan_nowiki_outside_templates() {
        assert_eq!(scan("<nowiki>{{X}}</nowiki> {{Y}}"), vec!["{{Y}}"]);
    }

    #[test]
    fn test_scan_unclosed_nowiki_stops() {
        assert_eq!(scan("{{A}} <nowiki>{{B}} {{C}}"), vec!["{{A}}"]);
    }

    #[test]
    fn test_scan_unbalanced_yields_prefix() {
        assert_eq!(scan("{{A}} {{B|{{C}}"), vec!["{{A}}"]);
        assert_eq!(scan("}} {{A}}"), vec!["{{A}}"]);
    }

    #[test]
    fn test_scan_ignores_comments() {
        assert_eq!(
            scan("<!-- {{Hidden}} -->{{Shown}}<!--\n{{Also hidden}}\n-->"),
            vec!["{{Shown}}"]
        );
    }

    #[test]
    fn test_remove_html_comments_is_idempotent() {
        let text = "a<!-- x -->b<!-- y <!-- z -->c-->d";
        let once = remove_html_comments(text).into_owned();
        let twice = remove_html_comments(&once).into_owned();
        assert_eq!(once, twice);
        assert_eq!(scan(&once), scan(text));
    }

    #[test]
    fn test_scan_empty_text() {
        assert!(scan("").is_empty());
        assert!(scan("no templates here").is_empty());
    }
}
