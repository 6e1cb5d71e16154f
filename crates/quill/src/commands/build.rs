//! `quill build` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_config::{CliSettings, Config};
use quill_highlight::Highlighter;
use quill_site::Site;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Article source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Site output directory (overrides config).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Enable verbose output (per-article render logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, highlighter construction or the
    /// site build fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.out_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Source directory: {}",
            config.content_resolved.source_dir.display()
        ));
        output.info(&format!(
            "Output directory: {}",
            config.content_resolved.output_dir.display()
        ));

        // The engine handle is constructed to completion here, before any
        // article render can run.
        let highlighter = Highlighter::new()?;

        let summary = Site::new(config, highlighter).build()?;

        if summary.drafts_skipped > 0 {
            output.warning(&format!("Skipped {} draft(s)", summary.drafts_skipped));
        }
        output.success(&format!("Built {} page(s)", summary.pages));

        Ok(())
    }
}
