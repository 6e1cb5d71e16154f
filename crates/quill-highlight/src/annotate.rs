//! Inline annotation markers in code samples.
//!
//! Articles mark lines inside fenced code blocks with trailing comments:
//!
//! ```text
//! let value = compute(); // [!code ++]
//! let value = 0;         // [!code --]
//! registry.insert(key);  // [!code focus]
//! ```
//!
//! The marker and its comment leader are stripped from the source before
//! highlighting; the annotation travels with the line into the decoration
//! pipeline.

use std::sync::LazyLock;

use regex::Regex;

/// Trailing annotation marker with an optional comment leader.
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\s*(?://|#|/\*|<!--))?\s*\[!code (\+\+|--|focus)\](?:\s*(?:\*/|-->))?\s*$")
        .unwrap()
});

/// Per-line annotation parsed from an inline marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Marker {
    /// Diff-style added line.
    Add,
    /// Diff-style removed line.
    Remove,
    /// Focused line; unfocused lines are dimmed.
    Focus,
}

/// One source line with its marker stripped.
#[derive(Debug)]
pub(crate) struct SourceLine {
    /// Line text without the marker or trailing newline.
    pub text: String,
    /// Annotation carried by the line, if any.
    pub marker: Option<Marker>,
}

/// Split source into lines, extracting and removing annotation markers.
pub(crate) fn strip_markers(source: &str) -> Vec<SourceLine> {
    source
        .lines()
        .map(|line| match MARKER.captures(line) {
            Some(caps) => {
                let marker = match &caps[1] {
                    "++" => Marker::Add,
                    "--" => Marker::Remove,
                    _ => Marker::Focus,
                };
                let end = caps.get(0).map_or(line.len(), |m| m.start());
                SourceLine {
                    text: line[..end].to_owned(),
                    marker: Some(marker),
                }
            }
            None => SourceLine {
                text: line.to_owned(),
                marker: None,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markers() {
        let lines = strip_markers("let x = 1;\nlet y = 2;");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "let x = 1;");
        assert_eq!(lines[0].marker, None);
        assert_eq!(lines[1].marker, None);
    }

    #[test]
    fn test_add_marker_with_slash_comment() {
        let lines = strip_markers("let x = 1; // [!code ++]");
        assert_eq!(lines[0].text, "let x = 1;");
        assert_eq!(lines[0].marker, Some(Marker::Add));
    }

    #[test]
    fn test_remove_marker_with_hash_comment() {
        let lines = strip_markers("value = None  # [!code --]");
        assert_eq!(lines[0].text, "value = None");
        assert_eq!(lines[0].marker, Some(Marker::Remove));
    }

    #[test]
    fn test_focus_marker_with_html_comment() {
        let lines = strip_markers("<main> <!-- [!code focus] -->");
        assert_eq!(lines[0].text, "<main>");
        assert_eq!(lines[0].marker, Some(Marker::Focus));
    }

    #[test]
    fn test_focus_marker_with_block_comment() {
        let lines = strip_markers("body { color: red; } /* [!code focus] */");
        assert_eq!(lines[0].text, "body { color: red; }");
        assert_eq!(lines[0].marker, Some(Marker::Focus));
    }

    #[test]
    fn test_marker_only_line_becomes_empty() {
        let lines = strip_markers("// [!code ++]");
        assert_eq!(lines[0].text, "");
        assert_eq!(lines[0].marker, Some(Marker::Add));
    }

    #[test]
    fn test_marker_must_be_at_end_of_line() {
        let lines = strip_markers("let marker = \"[!code ++] in a string\";");
        assert_eq!(lines[0].marker, None);
        assert_eq!(lines[0].text, "let marker = \"[!code ++] in a string\";");
    }

    #[test]
    fn test_mixed_lines() {
        let source = "fn old() {} // [!code --]\nfn new() {} // [!code ++]\nfn keep() {}";
        let lines = strip_markers(source);
        assert_eq!(lines[0].marker, Some(Marker::Remove));
        assert_eq!(lines[1].marker, Some(Marker::Add));
        assert_eq!(lines[2].marker, None);
    }
}
