//! Markdown renderer for blog articles.
//!
//! Converts article markdown to HTML via a pulldown-cmark event loop with a
//! [`RenderBackend`] trait for format-specific elements and a
//! [`CodeRenderer`] seam for fenced code blocks. A code renderer error
//! aborts the render: the build fails rather than publishing
//! partially-rendered content.
//!
//! # Example
//!
//! ```
//! use quill_renderer::{ArticleRenderer, HtmlBackend};
//!
//! let mut renderer = ArticleRenderer::<HtmlBackend>::new().with_title_extraction();
//! let rendered = renderer.render("# Title\n\nBody")?;
//! assert_eq!(rendered.title.as_deref(), Some("Title"));
//! # Ok::<(), quill_renderer::RenderError>(())
//! ```

mod backend;
mod code;
mod html;
mod renderer;

pub use backend::RenderBackend;
pub use code::{CodeError, CodeRenderer, RenderedCode};
pub use html::HtmlBackend;
pub use renderer::{ArticleRenderer, Rendered, RenderError, escape_html, slugify};
