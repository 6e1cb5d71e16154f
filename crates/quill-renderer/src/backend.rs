//! Render backend trait.

use std::borrow::Cow;

/// Format-specific rendering delegated by the generic event loop.
///
/// Shared structure (paragraphs, headings, lists, tables, inline
/// formatting) is handled by [`ArticleRenderer`](crate::ArticleRenderer);
/// backends decide how code blocks, blockquotes, images, breaks and links
/// are emitted.
pub trait RenderBackend {
    /// Render a fenced code block that no code renderer claimed.
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Open a blockquote.
    fn blockquote_start(out: &mut String);

    /// Close a blockquote.
    fn blockquote_end(out: &mut String);

    /// Render an image.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render a hard line break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Rewrite a link destination before emission.
    fn transform_link(url: &str) -> Cow<'_, str> {
        Cow::Borrowed(url)
    }
}
