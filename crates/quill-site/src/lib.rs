//! Article loading and site build pipeline.
//!
//! [`Site`] ties the pieces together: it scans the content directory for
//! article files, parses front matter, renders markdown through
//! `quill-renderer` with the syntax highlighter wired in as the code
//! renderer, wraps each page in its layout, and writes the output tree.
//!
//! Any render failure aborts the build; a partially-rendered site is never
//! written over a complete one page at a time.

mod article;
mod loader;
mod site;

pub use article::{Article, FrontMatter};
pub use site::{BuildSummary, HighlightCode, Site};

use std::path::PathBuf;

/// Error raised while building the site.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// I/O error reading content or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Content directory walk failed.
    #[error("content walk failed: {0}")]
    Walk(#[from] ignore::Error),
    /// Front matter failed to parse.
    #[error("{}: front matter error: {source}", path.display())]
    FrontMatter {
        /// Article file.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// Article body failed to render.
    #[error("{}: {source}", path.display())]
    Render {
        /// Article file.
        path: PathBuf,
        /// Underlying render error.
        #[source]
        source: quill_renderer::RenderError,
    },
    /// Two article files resolve to the same slug.
    #[error("duplicate slug '{0}'")]
    DuplicateSlug(String),
    /// A category maps to a layout this build does not provide.
    #[error("unknown layout '{0}'")]
    UnknownLayout(String),
}
