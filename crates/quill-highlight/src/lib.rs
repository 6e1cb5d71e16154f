//! Syntax highlighting configuration for article code samples.
//!
//! This crate wires the highlighting engine into the content pipeline:
//! a [`Highlighter`] handle owns the syntax and theme tables (loaded once
//! at construction) and turns a code string plus a language tag into
//! decorated HTML.
//!
//! The decoration pipeline runs in a fixed order:
//! 1. diff annotations (`[!code ++]` / `[!code --]` markers become
//!    added/removed line styling),
//! 2. focus annotations (`[!code focus]` markers dim unfocused lines),
//! 3. removal of the `tabindex` attribute from the root `<pre>` node.
//!
//! The final markup has every literal `{` and `}` replaced by its named
//! entity so the output can be embedded in template-processed pages.
//!
//! # Example
//!
//! ```
//! use quill_highlight::Highlighter;
//!
//! let highlighter = Highlighter::new()?;
//! let html = highlighter.render("const x = 1;", "js")?;
//! assert!(html.starts_with("<pre class=\"code-block\""));
//! # Ok::<(), quill_highlight::HighlightError>(())
//! ```

mod annotate;
mod block;
mod engine;
mod escape;
mod language;

pub use engine::Highlighter;
pub use escape::escape_braces;
pub use language::{Language, ThemeId};

/// Error raised by the highlighting pipeline.
///
/// Failures are surfaced to the content build as-is; there is no retry and
/// no fallback rendering.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// The language tag is not in the fixed registry.
    #[error("unrecognized language tag: {0}")]
    UnknownLanguage(String),
    /// The bundled syntax set has no grammar for a registered language.
    #[error("bundled syntax set has no grammar for '{0}'")]
    MissingSyntax(&'static str),
    /// The bundled theme set has no theme with the configured name.
    #[error("bundled theme set has no theme named '{0}'")]
    MissingTheme(&'static str),
    /// The underlying engine failed to highlight.
    #[error("highlighting failed: {0}")]
    Engine(#[from] syntect::Error),
}
