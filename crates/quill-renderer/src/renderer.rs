//! Generic article renderer with pluggable backend.

use std::fmt::Write;
use std::marker::PhantomData;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::backend::RenderBackend;
use crate::code::{CodeError, CodeRenderer, RenderedCode};

/// Result of rendering an article body.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from the first H1 heading (if enabled).
    pub title: Option<String>,
}

/// Error returned when an article fails to render.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A fenced code block failed to render.
    #[error("code block ({language}) failed to render: {source}")]
    Code {
        /// Fence language tag.
        language: String,
        #[source]
        source: CodeError,
    },
}

/// In-progress heading capture.
#[derive(Default)]
struct HeadingBuf {
    level: u8,
    html: String,
    text: String,
}

/// Generic article renderer.
///
/// Handles common markdown structure generically and delegates
/// format-specific elements to the [`RenderBackend`]. Fenced code blocks
/// with a language tag are offered to the registered [`CodeRenderer`]
/// first; `PassThrough` (and untagged blocks) fall back to the backend.
pub struct ArticleRenderer<B: RenderBackend> {
    output: String,
    code: Option<(Option<String>, String)>,
    heading: Option<HeadingBuf>,
    image_alt: Option<String>,
    pending_image: Option<(String, String)>,
    in_table_head: bool,
    title: Option<String>,
    extract_title: bool,
    gfm: bool,
    code_renderer: Option<Box<dyn CodeRenderer>>,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> ArticleRenderer<B> {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: None,
            heading: None,
            image_alt: None,
            pending_image: None,
            in_table_head: false,
            title: None,
            extract_title: false,
            gfm: true,
            code_renderer: None,
            _backend: PhantomData,
        }
    }

    /// Enable title extraction from the first H1 heading.
    ///
    /// The heading is still rendered; its text is also returned in
    /// [`Rendered::title`].
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Register the code renderer for fenced blocks.
    #[must_use]
    pub fn with_code_renderer<C: CodeRenderer + 'static>(mut self, renderer: C) -> Self {
        self.code_renderer = Some(Box::new(renderer));
        self
    }

    /// Render article markdown to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Code`] if the code renderer fails on any
    /// fenced block; nothing is emitted for a failed article.
    pub fn render(&mut self, markdown: &str) -> Result<Rendered, RenderError> {
        self.output.clear();
        self.title = None;

        let options = if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        };

        for event in Parser::new_ext(markdown, options) {
            self.process_event(event)?;
        }

        Ok(Rendered {
            html: std::mem::take(&mut self.output),
            title: self.title.take(),
        })
    }

    /// Push inline content to the output or the active heading buffer.
    fn push_inline(&mut self, content: &str) {
        if let Some(heading) = &mut self.heading {
            heading.html.push_str(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.start_tag(&tag),
            Event::End(tag) => self.end_tag(tag)?,
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => B::hard_break(&mut self.output),
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: &Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.output.push_str("<p>");
            }
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the slug is known.
                self.heading = Some(HeadingBuf {
                    level: heading_level_to_num(*level),
                    ..HeadingBuf::default()
                });
            }
            Tag::BlockQuote(_) => B::blockquote_start(&mut self.output),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => fence_language(info),
                    _ => None,
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => {
                match start {
                    Some(1) => self.output.push_str("<ol>"),
                    Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                    None => self.output.push_str("<ul>"),
                }
            }
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(_) => self.output.push_str("<table>"),
            Tag::TableHead => {
                self.in_table_head = true;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => self.output.push_str("<tr>"),
            Tag::TableCell => {
                self.output
                    .push_str(if self.in_table_head { "<th>" } else { "<td>" });
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Link { dest_url, .. } => {
                let href = B::transform_link(dest_url);
                let link = format!(r#"<a href="{}">"#, escape_html(&href));
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text arrives as inline events; render in end_tag.
                self.image_alt = Some(String::new());
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) -> Result<(), RenderError> {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.take() {
                    if self.extract_title && heading.level == 1 && self.title.is_none() {
                        self.title = Some(heading.text.trim().to_owned());
                    }
                    let level = heading.level;
                    write!(
                        self.output,
                        r#"<h{level} id="{}">{}</h{level}>"#,
                        slugify(&heading.text),
                        heading.html.trim()
                    )
                    .unwrap();
                }
            }
            TagEnd::BlockQuote(_) => B::blockquote_end(&mut self.output),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.take().unwrap_or_default();
                self.render_code_block(lang, &content)?;
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output
                    .push_str(if self.in_table_head { "</th>" } else { "</td>" });
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let alt = self.image_alt.take().unwrap_or_default();
                if let Some((src, title)) = self.pending_image.take() {
                    B::image(&src, &alt, &title, &mut self.output);
                }
            }
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition => {}
        }
        Ok(())
    }

    fn render_code_block(&mut self, lang: Option<String>, content: &str) -> Result<(), RenderError> {
        if let (Some(language), Some(renderer)) = (&lang, &self.code_renderer) {
            match renderer.render(language, content) {
                Ok(RenderedCode::Html(html)) => {
                    self.output.push_str(&html);
                    return Ok(());
                }
                Ok(RenderedCode::PassThrough) => {}
                Err(source) => {
                    return Err(RenderError::Code {
                        language: language.clone(),
                        source,
                    });
                }
            }
        }
        B::code_block(lang.as_deref(), content, &mut self.output);
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if let Some((_, content)) = &mut self.code {
            content.push_str(text);
        } else if let Some(alt) = &mut self.image_alt {
            alt.push_str(text);
        } else if let Some(heading) = &mut self.heading {
            heading.text.push_str(text);
            heading.html.push_str(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(heading) = &mut self.heading {
            heading.text.push_str(code);
            write!(heading.html, "<code>{}</code>", escape_html(code)).unwrap();
        } else {
            write!(self.output, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }

    fn soft_break(&mut self) {
        if let Some((_, content)) = &mut self.code {
            content.push('\n');
        } else {
            self.output.push('\n');
        }
    }

    fn task_list_marker(&mut self, checked: bool) {
        self.output.push_str(if checked {
            r#"<input type="checkbox" disabled checked> "#
        } else {
            r#"<input type="checkbox" disabled> "#
        });
    }
}

impl<B: RenderBackend> Default for ArticleRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Language tag from fence info: the first whitespace-separated token.
fn fence_language(info: &str) -> Option<String> {
    let lang = info.split_whitespace().next()?;
    if lang.is_empty() {
        None
    } else {
        Some(lang.to_owned())
    }
}

fn heading_level_to_num(level: pulldown_cmark::HeadingLevel) -> u8 {
    use pulldown_cmark::HeadingLevel;
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Escape HTML-reserved characters in text content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Derive a URL-safe anchor slug from heading text.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_dash = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    slug.trim_end_matches('-').to_owned()
}
