//! Code block rendering seam.

/// Error from a code renderer. The render aborts on the first one.
pub type CodeError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of offering a fenced code block to a [`CodeRenderer`].
#[derive(Debug)]
pub enum RenderedCode {
    /// Replacement HTML for the block.
    Html(String),
    /// Not handled; the backend renders a plain escaped block.
    PassThrough,
}

/// Renders fenced code blocks encountered in article markdown.
///
/// Tagged blocks are offered to the registered renderer; untagged blocks
/// always fall through to the backend.
pub trait CodeRenderer {
    /// Render one fenced code block.
    ///
    /// # Errors
    ///
    /// Any error fails the whole article render.
    fn render(&self, language: &str, source: &str) -> Result<RenderedCode, CodeError>;
}
