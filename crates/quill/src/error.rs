//! CLI error types.

use quill_config::ConfigError;
use quill_highlight::HighlightError;
use quill_site::BuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Highlight(#[from] HighlightError),

    #[error("{0}")]
    Build(#[from] BuildError),
}
