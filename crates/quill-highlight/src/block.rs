//! Rendered code block model and the decoration pipeline.
//!
//! A [`CodeBlock`] holds highlighted lines plus their annotations. Block
//! transforms are applied in registration order before serialization, the
//! same dispatch shape the markdown renderer uses for code processors.

use std::fmt::Write;

use crate::annotate::Marker;
use crate::language::Language;

/// One highlighted line with its style classes.
#[derive(Debug)]
pub(crate) struct Line {
    /// Highlighted HTML for the line, trailing newline included.
    pub html: String,
    /// Annotation carried over from the source marker.
    pub marker: Option<Marker>,
    /// Style classes, starting with `line`.
    pub classes: Vec<&'static str>,
}

impl Line {
    pub(crate) fn new(html: String, marker: Option<Marker>) -> Self {
        Self {
            html,
            marker,
            classes: vec!["line"],
        }
    }
}

/// A highlighted code block before serialization.
#[derive(Debug)]
pub(crate) struct CodeBlock {
    pub language: Language,
    pub lines: Vec<Line>,
    /// Root node classes, starting with `code-block`.
    pub root_classes: Vec<&'static str>,
    /// `tabindex` value on the root `<pre>`. Stripped by the last pipeline
    /// stage before serialization.
    pub tabindex: Option<&'static str>,
}

impl CodeBlock {
    pub(crate) fn new(language: Language) -> Self {
        Self {
            language,
            lines: Vec::new(),
            root_classes: vec!["code-block"],
            tabindex: Some("0"),
        }
    }

    /// Serialize the block to HTML.
    pub(crate) fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.html.len() + 32).sum());
        write!(
            out,
            r#"<pre class="{}" data-language="{}" data-theme="{}""#,
            self.root_classes.join(" "),
            self.language.tag(),
            self.language.theme().slug()
        )
        .unwrap();
        if let Some(tabindex) = self.tabindex {
            write!(out, r#" tabindex="{tabindex}""#).unwrap();
        }
        out.push_str("><code>");
        for line in &self.lines {
            write!(out, r#"<span class="{}">{}</span>"#, line.classes.join(" "), line.html)
                .unwrap();
        }
        out.push_str("</code></pre>");
        out
    }
}

/// One stage of the decoration pipeline.
pub(crate) trait BlockTransform: Send + Sync {
    fn apply(&self, block: &mut CodeBlock);
}

/// Turns diff markers into added/removed line styling.
pub(crate) struct DiffTransform;

impl BlockTransform for DiffTransform {
    fn apply(&self, block: &mut CodeBlock) {
        for line in &mut block.lines {
            match line.marker {
                Some(Marker::Add) => line.classes.extend(["diff", "add"]),
                Some(Marker::Remove) => line.classes.extend(["diff", "remove"]),
                Some(Marker::Focus) | None => {}
            }
        }
    }
}

/// Turns focus markers into focused-region styling.
///
/// When any line is focused the root gains `has-focus` and every unfocused
/// line gains `dim`, so stylesheets can fade everything outside the region.
pub(crate) struct FocusTransform;

impl BlockTransform for FocusTransform {
    fn apply(&self, block: &mut CodeBlock) {
        let any_focused = block
            .lines
            .iter()
            .any(|line| line.marker == Some(Marker::Focus));
        if !any_focused {
            return;
        }
        block.root_classes.push("has-focus");
        for line in &mut block.lines {
            if line.marker == Some(Marker::Focus) {
                line.classes.push("focus");
            } else {
                line.classes.push("dim");
            }
        }
    }
}

/// Removes the `tabindex` attribute from the root node.
///
/// The surrounding page styles scrollable code regions itself; the attribute
/// the base renderer emits is dropped here.
pub(crate) struct StripTabindex;

impl BlockTransform for StripTabindex {
    fn apply(&self, block: &mut CodeBlock) {
        block.tabindex = None;
    }
}

/// The decoration pipeline in its fixed order: diff, focus, tabindex strip.
pub(crate) fn decoration_pipeline() -> Vec<Box<dyn BlockTransform>> {
    vec![
        Box::new(DiffTransform),
        Box::new(FocusTransform),
        Box::new(StripTabindex),
    ]
}
