//! Site build pipeline.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::sync::Arc;

use quill_config::Config;
use quill_highlight::Highlighter;
use quill_renderer::{
    ArticleRenderer, CodeError, CodeRenderer, HtmlBackend, RenderedCode, escape_html,
};

use crate::article::{self, Article};
use crate::{BuildError, loader};

/// Code renderer backed by the syntax highlighting engine.
///
/// Every tagged fence goes to the engine; an unrecognized tag is an error
/// that fails the build, never a plain-text fallback.
pub struct HighlightCode {
    highlighter: Arc<Highlighter>,
}

impl HighlightCode {
    /// Wrap a shared highlighter handle.
    #[must_use]
    pub fn new(highlighter: Arc<Highlighter>) -> Self {
        Self { highlighter }
    }
}

impl CodeRenderer for HighlightCode {
    fn render(&self, language: &str, source: &str) -> Result<RenderedCode, CodeError> {
        let html = self.highlighter.render(source, language)?;
        Ok(RenderedCode::Html(html))
    }
}

/// Result of a completed site build.
#[derive(Clone, Copy, Debug)]
pub struct BuildSummary {
    /// Articles rendered and written.
    pub pages: usize,
    /// Draft articles skipped.
    pub drafts_skipped: usize,
}

/// The blog site: configuration plus the highlighting engine handle.
///
/// The highlighter is constructed by the host before the site is built, so
/// every render call sees a ready engine.
pub struct Site {
    config: Config,
    highlighter: Arc<Highlighter>,
}

impl Site {
    /// Create a site from loaded configuration and a ready highlighter.
    #[must_use]
    pub fn new(config: Config, highlighter: Highlighter) -> Self {
        Self {
            config,
            highlighter: Arc::new(highlighter),
        }
    }

    /// Render every article and write the output tree.
    ///
    /// Articles are read from the configured source directory, filtered to
    /// recognized extensions, rendered, wrapped in their category's layout
    /// and written to `<output>/<slug>/index.html` plus a site index.
    ///
    /// # Errors
    ///
    /// Fails on the first I/O, front matter, layout or render error. A
    /// failed build writes no index page.
    pub fn build(&self) -> Result<BuildSummary, BuildError> {
        let content = &self.config.content_resolved;
        let files = loader::scan(&content.source_dir, &content.extensions)?;

        let mut articles = Vec::new();
        let mut drafts_skipped = 0;
        let mut seen_slugs = BTreeSet::new();

        for path in files {
            let source = fs::read_to_string(&path)?;
            let (front, body) = article::split_front_matter(&path, &source)?;
            if front.draft {
                tracing::info!(path = %path.display(), "skipping draft");
                drafts_skipped += 1;
                continue;
            }

            let slug = article::slug_for(&path);
            if !seen_slugs.insert(slug.clone()) {
                return Err(BuildError::DuplicateSlug(slug));
            }

            let rendered = ArticleRenderer::<HtmlBackend>::new()
                .with_title_extraction()
                .with_code_renderer(HighlightCode::new(Arc::clone(&self.highlighter)))
                .render(body)
                .map_err(|source| BuildError::Render {
                    path: path.clone(),
                    source,
                })?;

            let title = front
                .title
                .or(rendered.title)
                .unwrap_or_else(|| slug.clone());
            tracing::info!(slug = %slug, "rendered article");

            articles.push(Article {
                slug,
                title,
                category: front.category,
                date: front.date,
                html: rendered.html,
            });
        }

        // Index order: newest first, slug as tie-breaker.
        articles.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        let out = &content.output_dir;
        fs::create_dir_all(out)?;
        for article in &articles {
            let category = article.category.as_deref().unwrap_or_default();
            let layout = self.config.layout_for(category);
            let page = self.render_layout(layout, article)?;
            let dir = out.join(&article.slug);
            fs::create_dir_all(&dir)?;
            fs::write(dir.join("index.html"), page)?;
        }
        fs::write(out.join("index.html"), self.index_page(&articles))?;

        Ok(BuildSummary {
            pages: articles.len(),
            drafts_skipped,
        })
    }

    /// Wrap a rendered article in its page template.
    fn render_layout(&self, layout: &str, article: &Article) -> Result<String, BuildError> {
        match layout {
            quill_config::DEFAULT_LAYOUT => Ok(self.article_shell(article)),
            other => Err(BuildError::UnknownLayout(other.to_owned())),
        }
    }

    fn article_shell(&self, article: &Article) -> String {
        let site_title = escape_html(&self.config.site.title);
        let title = escape_html(&article.title);
        let base_url = escape_html(&self.config.site.base_url);
        let date_line = article.date.as_deref().map_or_else(String::new, |date| {
            format!("<p class=\"date\">{}</p>\n", escape_html(date))
        });
        format!(
            "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title} · {site_title}</title>\n</head>\n<body>\n\
             <header><a href=\"{base_url}\">{site_title}</a></header>\n\
             <main>\n<article>\n{date_line}{body}\n</article>\n</main>\n</body>\n</html>\n",
            body = article.html,
        )
    }

    fn index_page(&self, articles: &[Article]) -> String {
        let site_title = escape_html(&self.config.site.title);
        let mut items = String::new();
        for article in articles {
            let date = article
                .date
                .as_deref()
                .map_or_else(String::new, |d| format!("<time>{}</time> ", escape_html(d)));
            writeln!(
                items,
                "<li>{date}<a href=\"/{}\">{}</a></li>",
                article.slug,
                escape_html(&article.title)
            )
            .unwrap();
        }
        format!(
            "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{site_title}</title>\n</head>\n<body>\n<h1>{site_title}</h1>\n\
             <ul>\n{items}</ul>\n</body>\n</html>\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    /// Write a config file and content tree, returning the loaded site.
    fn site_with(articles: &[(&str, &str)], config_toml: &str) -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("quill.toml");
        fs::write(&config_path, config_toml).unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        for (name, body) in articles {
            fs::write(dir.path().join("content").join(name), body).unwrap();
        }
        let config = Config::load(Some(config_path.as_path()), None).unwrap();
        let site = Site::new(config, Highlighter::new().unwrap());
        (dir, site)
    }

    const BASIC_CONFIG: &str = "[site]\ntitle = \"Patterns\"\n";

    fn read_page(root: &Path, slug: &str) -> String {
        fs::read_to_string(root.join("public").join(slug).join("index.html")).unwrap()
    }

    #[test]
    fn test_build_writes_article_and_index() {
        let (dir, site) = site_with(
            &[(
                "singleton.md",
                "---\ntitle: The Singleton Pattern\ndate: \"2024-11-02\"\n---\n\nOne instance only.\n",
            )],
            BASIC_CONFIG,
        );

        let summary = site.build().unwrap();
        assert_eq!(summary.pages, 1);
        assert_eq!(summary.drafts_skipped, 0);

        let page = read_page(dir.path(), "singleton");
        assert!(page.contains("<title>The Singleton Pattern · Patterns</title>"));
        assert!(page.contains("<p>One instance only.</p>"));

        let index = fs::read_to_string(dir.path().join("public/index.html")).unwrap();
        assert!(index.contains("<a href=\"/singleton\">The Singleton Pattern</a>"));
        assert!(index.contains("<time>2024-11-02</time>"));
    }

    #[test]
    fn test_build_highlights_code_fences() {
        let body = "# Prototype\n\n```js\nconst copy = { ...original };\n```\n";
        let (dir, site) = site_with(&[("prototype.md", body)], BASIC_CONFIG);

        site.build().unwrap();
        let page = read_page(dir.path(), "prototype");
        assert!(page.contains(r#"data-language="js""#));
        assert!(page.contains(r#"data-theme="ocean-dark""#));
        // Braces in the sample are entity-escaped for the template layer.
        assert!(page.contains("&#123;"));
        assert!(!page.contains("const copy = {"));
    }

    #[test]
    fn test_build_fails_on_unknown_fence_language() {
        let body = "```ruby\nputs :no\n```\n";
        let (_dir, site) = site_with(&[("post.md", body)], BASIC_CONFIG);

        let err = site.build().unwrap_err();
        assert!(matches!(err, BuildError::Render { .. }));
        assert!(err.to_string().contains("post.md"));
    }

    #[test]
    fn test_build_skips_drafts() {
        let (dir, site) = site_with(
            &[
                ("done.md", "# Done\n"),
                ("wip.md", "---\ndraft: true\n---\n# WIP\n"),
            ],
            BASIC_CONFIG,
        );

        let summary = site.build().unwrap();
        assert_eq!(summary.pages, 1);
        assert_eq!(summary.drafts_skipped, 1);
        assert!(!dir.path().join("public/wip").exists());
    }

    #[test]
    fn test_build_title_falls_back_to_heading_then_slug() {
        let (dir, site) = site_with(
            &[
                ("with-heading.md", "# From Heading\n\nx\n"),
                ("bare.md", "just text\n"),
            ],
            BASIC_CONFIG,
        );

        site.build().unwrap();
        assert!(read_page(dir.path(), "with-heading").contains("<title>From Heading ·"));
        assert!(read_page(dir.path(), "bare").contains("<title>bare ·"));
    }

    #[test]
    fn test_build_duplicate_slug_fails() {
        let (_dir, site) = site_with(
            &[("post.md", "# A\n"), ("post.mdx", "# B\n")],
            BASIC_CONFIG,
        );

        let err = site.build().unwrap_err();
        assert!(matches!(err, BuildError::DuplicateSlug(slug) if slug == "post"));
    }

    #[test]
    fn test_build_unknown_layout_fails() {
        let config = "[site]\ntitle = \"Patterns\"\n\n[layouts]\ncreational = \"fancy\"\n";
        let (_dir, site) = site_with(
            &[("s.md", "---\ncategory: creational\n---\n# S\n")],
            config,
        );

        let err = site.build().unwrap_err();
        assert!(matches!(err, BuildError::UnknownLayout(layout) if layout == "fancy"));
    }

    #[test]
    fn test_index_orders_newest_first() {
        let (dir, site) = site_with(
            &[
                ("old.md", "---\ntitle: Old\ndate: \"2023-01-01\"\n---\nx\n"),
                ("new.md", "---\ntitle: New\ndate: \"2025-06-01\"\n---\nx\n"),
            ],
            BASIC_CONFIG,
        );

        site.build().unwrap();
        let index = fs::read_to_string(dir.path().join("public/index.html")).unwrap();
        let new_pos = index.find("New").unwrap();
        let old_pos = index.find("Old").unwrap();
        assert!(new_pos < old_pos);
    }

    #[test]
    fn test_build_empty_content_dir_writes_index() {
        let (dir, site) = site_with(&[], BASIC_CONFIG);
        let summary = site.build().unwrap();
        assert_eq!(summary.pages, 0);
        assert!(dir.path().join("public/index.html").exists());
    }
}
