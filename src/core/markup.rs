//! # Inline Markup
//!
//! Message text supports exactly two inline constructs:
//!
//! ```text
//! **X**  →  strong(X)
//! *Y*    →  emphasis(Y)
//! ```
//!
//! Bold is substituted first, then italic runs over the bold-substituted
//! result, so an italic span may sit inside (or straddle) a bold one. Both
//! passes match left to right, shortest first, without overlap. A marker pair
//! must enclose at least one character, so a stray `*` or `**` stays literal.
//!
//! Everything else in the text is inert: parsing yields plain segments and the
//! renderer draws them as literal terminal text.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("italic pattern is valid"));

// Private-use code points mark span boundaries between the two passes.
const STRONG_OPEN: char = '\u{E000}';
const STRONG_CLOSE: char = '\u{E001}';
const EMPHASIS_OPEN: char = '\u{E002}';
const EMPHASIS_CLOSE: char = '\u{E003}';

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Split message text into styled segments.
///
/// Adjacent characters with the same style are merged; empty runs are dropped.
pub fn parse(text: &str) -> Vec<Segment> {
    let sanitized: String = text
        .chars()
        .map(|c| if is_marker(c) { char::REPLACEMENT_CHARACTER } else { c })
        .collect();

    let bold = BOLD.replace_all(
        &sanitized,
        format!("{STRONG_OPEN}${{1}}{STRONG_CLOSE}").as_str(),
    );
    let marked = ITALIC.replace_all(
        &bold,
        format!("{EMPHASIS_OPEN}${{1}}{EMPHASIS_CLOSE}").as_str(),
    );

    let mut segments = Vec::new();
    let mut current = Segment::default();
    for c in marked.chars() {
        let (strong, emphasis) = match c {
            STRONG_OPEN => (true, current.emphasis),
            STRONG_CLOSE => (false, current.emphasis),
            EMPHASIS_OPEN => (current.strong, true),
            EMPHASIS_CLOSE => (current.strong, false),
            _ => {
                current.text.push(c);
                continue;
            }
        };
        let next = Segment {
            text: String::new(),
            strong,
            emphasis,
        };
        let done = std::mem::replace(&mut current, next);
        if !done.text.is_empty() {
            segments.push(done);
        }
    }
    if !current.text.is_empty() {
        segments.push(current);
    }

    merge_adjacent(segments)
}

/// The text with all markers removed, as a reader would see it.
pub fn plain_text(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

fn is_marker(c: char) -> bool {
    matches!(c, STRONG_OPEN | STRONG_CLOSE | EMPHASIS_OPEN | EMPHASIS_CLOSE)
}

fn merge_adjacent(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for seg in segments {
        match merged.last_mut() {
            Some(prev) if prev.strong == seg.strong && prev.emphasis == seg.emphasis => {
                prev.text.push_str(&seg.text);
            }
            _ => merged.push(seg),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong(text: &str) -> Segment {
        Segment {
            text: text.to_string(),
            strong: true,
            emphasis: false,
        }
    }

    fn emphasis(text: &str) -> Segment {
        Segment {
            text: text.to_string(),
            strong: false,
            emphasis: true,
        }
    }

    #[test]
    fn plain_text_is_one_segment() {
        assert_eq!(parse("just text"), vec![Segment::plain("just text")]);
    }

    #[test]
    fn empty_text_has_no_segments() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn bold_becomes_strong() {
        assert_eq!(
            parse("Hello **world**"),
            vec![Segment::plain("Hello "), strong("world")]
        );
    }

    #[test]
    fn single_asterisks_become_emphasis() {
        assert_eq!(
            parse("an *italic* word"),
            vec![
                Segment::plain("an "),
                emphasis("italic"),
                Segment::plain(" word")
            ]
        );
    }

    #[test]
    fn italic_nested_in_bold() {
        assert_eq!(
            parse("**a *b* c**"),
            vec![
                strong("a "),
                Segment {
                    text: "b".into(),
                    strong: true,
                    emphasis: true
                },
                strong(" c"),
            ]
        );
    }

    #[test]
    fn matches_are_lazy_and_non_overlapping() {
        assert_eq!(
            parse("**a** and **b**"),
            vec![strong("a"), Segment::plain(" and "), strong("b")]
        );
        assert_eq!(
            parse("*x* *y*"),
            vec![emphasis("x"), Segment::plain(" "), emphasis("y")]
        );
    }

    #[test]
    fn unmatched_asterisks_pass_through() {
        assert_eq!(parse("2 * 3 = 6"), vec![Segment::plain("2 * 3 = 6")]);
        assert_eq!(parse("**bold"), vec![Segment::plain("**bold")]);
        assert_eq!(parse("a ** b"), vec![Segment::plain("a ** b")]);
        assert_eq!(parse("**"), vec![Segment::plain("**")]);
    }

    #[test]
    fn markers_do_not_span_lines() {
        assert_eq!(parse("*a\nb*"), vec![Segment::plain("*a\nb*")]);
    }

    #[test]
    fn html_like_text_is_inert() {
        let segments = parse("<script>alert(1)</script> **<b>x</b>**");
        assert_eq!(
            segments,
            vec![
                Segment::plain("<script>alert(1)</script> "),
                strong("<b>x</b>")
            ]
        );
    }

    #[test]
    fn private_use_markers_in_input_are_neutralized() {
        let segments = parse("a\u{E000}b");
        assert_eq!(segments, vec![Segment::plain("a\u{FFFD}b")]);
    }

    #[test]
    fn plain_text_strips_markers() {
        assert_eq!(plain_text(&parse("Hello **world**, *hi*")), "Hello world, hi");
    }
}
