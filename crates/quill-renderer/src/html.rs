//! HTML backend for article rendering.

use std::borrow::Cow;
use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::renderer::escape_html;

/// HTML render backend.
///
/// Produces semantic HTML5 and rewrites relative article links
/// (`./prototype.md` → `/prototype`) for clean URLs.
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
        }
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }

    fn transform_link(url: &str) -> Cow<'_, str> {
        resolve_article_link(url)
    }
}

/// Rewrite relative article links to clean site URLs.
///
/// `./prototype.md` and `prototype.mdx#intro` become `/prototype` and
/// `/prototype#intro`. External URLs, fragment-only links and non-article
/// links pass through unchanged. Articles live in one flat directory, so no
/// parent traversal is involved.
#[allow(clippy::case_sensitive_file_extension_comparisons)]
fn resolve_article_link(url: &str) -> Cow<'_, str> {
    if url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("mailto:")
        || url.starts_with('#')
    {
        return Cow::Borrowed(url);
    }

    let (path, fragment) = match url.find('#') {
        Some(pos) => (&url[..pos], &url[pos..]),
        None => (url, ""),
    };

    let stem = path
        .strip_suffix(".md")
        .or_else(|| path.strip_suffix(".mdx"));
    let Some(stem) = stem else {
        return Cow::Borrowed(url);
    };

    let slug = stem.trim_start_matches("./").trim_start_matches('/');
    Cow::Owned(format!("/{slug}{fragment}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        HtmlBackend::code_block(Some("text"), "a < b", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="language-text">a &lt; b</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let mut out = String::new();
        HtmlBackend::code_block(None, "plain", &mut out);
        assert_eq!(out, "<pre><code>plain</code></pre>");
    }

    #[test]
    fn test_blockquote() {
        let mut out = String::new();
        HtmlBackend::blockquote_start(&mut out);
        out.push_str("quote");
        HtmlBackend::blockquote_end(&mut out);
        assert_eq!(out, "<blockquote>quote</blockquote>");
    }

    #[test]
    fn test_image_with_title() {
        let mut out = String::new();
        HtmlBackend::image("uml.png", "Class diagram", "Singleton", &mut out);
        assert_eq!(
            out,
            r#"<img src="uml.png" title="Singleton" alt="Class diagram">"#
        );
    }

    #[test]
    fn test_resolve_relative_article_link() {
        assert_eq!(resolve_article_link("./prototype.md"), "/prototype");
        assert_eq!(resolve_article_link("singleton.mdx"), "/singleton");
    }

    #[test]
    fn test_resolve_link_keeps_fragment() {
        assert_eq!(
            resolve_article_link("./prototype.md#cloning"),
            "/prototype#cloning"
        );
    }

    #[test]
    fn test_external_links_unchanged() {
        assert_eq!(
            resolve_article_link("https://example.com/a.md"),
            "https://example.com/a.md"
        );
        assert_eq!(resolve_article_link("#section"), "#section");
    }

    #[test]
    fn test_non_article_links_unchanged() {
        assert_eq!(resolve_article_link("./diagram.png"), "./diagram.png");
    }
}
