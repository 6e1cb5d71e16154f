//! Configuration management for quill.
//!
//! Parses `quill.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Template identifier used when a category has no layout mapping.
pub const DEFAULT_LAYOUT: &str = "article";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override site output directory.
    pub output_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site identity.
    pub site: SiteConfig,
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Mapping from article category to page-template identifier.
    ///
    /// Reserved extension point; empty by default. Categories without an
    /// entry use [`DEFAULT_LAYOUT`].
    pub layouts: BTreeMap<String, String>,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site identity configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, used in page shells and the index.
    pub title: String,
    /// Base URL prefix for generated links.
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "quill".to_owned(),
            base_url: "/".to_owned(),
        }
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    extensions: Option<Vec<String>>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug)]
pub struct ContentConfig {
    /// Source directory for article files.
    pub source_dir: PathBuf,
    /// Output directory for the generated site.
    pub output_dir: PathBuf,
    /// File extensions treated as processable articles (without the dot).
    pub extensions: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("public"),
            extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_owned(), "mdx".to_owned()]
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quill.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.content_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Page-template identifier for an article category.
    ///
    /// Returns the mapped identifier, or [`DEFAULT_LAYOUT`] for categories
    /// without an entry (the mapping ships empty).
    #[must_use]
    pub fn layout_for(&self, category: &str) -> &str {
        self.layouts
            .get(category)
            .map_or(DEFAULT_LAYOUT, String::as_str)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            content: ContentConfigRaw::default(),
            layouts: BTreeMap::new(),
            content_resolved: ContentConfig {
                source_dir: base.join("content"),
                output_dir: base.join("public"),
                extensions: default_extensions(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_non_empty(&self.site.base_url, "site.base_url")?;

        if self.content_resolved.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "content.extensions cannot be empty".to_owned(),
            ));
        }
        for ext in &self.content_resolved.extensions {
            require_non_empty(ext, "content.extensions entry")?;
            if ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "content.extensions entry '{ext}' must not include the dot"
                )));
            }
        }

        for (category, layout) in &self.layouts {
            require_non_empty(category, "layouts key")?;
            require_non_empty(layout, &format!("layouts.{category}"))?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            source_dir: resolve(self.content.source_dir.as_deref(), "content"),
            output_dir: resolve(self.content.output_dir.as_deref(), "public"),
            extensions: self
                .content
                .extensions
                .clone()
                .unwrap_or_else(default_extensions),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/blog"));
        assert_eq!(config.site.title, "quill");
        assert_eq!(config.site.base_url, "/");
        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/blog/content")
        );
        assert_eq!(
            config.content_resolved.output_dir,
            PathBuf::from("/blog/public")
        );
        assert_eq!(config.content_resolved.extensions, vec!["md", "mdx"]);
        assert!(config.layouts.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.title, "quill");
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
title = "Patterns & Practice"
base_url = "/blog/"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Patterns & Practice");
        assert_eq!(config.site.base_url, "/blog/");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[content]
source_dir = "articles"
output_dir = "dist"
extensions = ["md"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/project/articles")
        );
        assert_eq!(
            config.content_resolved.output_dir,
            PathBuf::from("/project/dist")
        );
        assert_eq!(config.content_resolved.extensions, vec!["md"]);
    }

    #[test]
    fn test_layout_for_unmapped_category_uses_default() {
        let config = Config::default_with_base(Path::new("/blog"));
        assert_eq!(config.layout_for("creational"), DEFAULT_LAYOUT);
    }

    #[test]
    fn test_layout_for_mapped_category() {
        let toml = r#"
[layouts]
creational = "pattern-page"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.layout_for("creational"), "pattern-page");
        assert_eq!(config.layout_for("behavioral"), DEFAULT_LAYOUT);
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/blog"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere/posts")),
            output_dir: None,
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/elsewhere/posts")
        );
        // Unchanged
        assert_eq!(
            config.content_resolved.output_dir,
            PathBuf::from("/blog/public")
        );
    }

    #[test]
    fn test_validate_default_passes() {
        let config = Config::default_with_base(Path::new("/blog"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_title() {
        let mut config = Config::default_with_base(Path::new("/blog"));
        config.site.title = String::new();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("site.title"));
    }

    #[test]
    fn test_validate_empty_extensions() {
        let mut config = Config::default_with_base(Path::new("/blog"));
        config.content_resolved.extensions.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("content.extensions"));
    }

    #[test]
    fn test_validate_extension_with_dot() {
        let mut config = Config::default_with_base(Path::new("/blog"));
        config.content_resolved.extensions = vec![".md".to_owned()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must not include the dot"));
    }

    #[test]
    fn test_validate_empty_layout_value() {
        let mut config = Config::default_with_base(Path::new("/blog"));
        config
            .layouts
            .insert("creational".to_owned(), String::new());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("layouts.creational"));
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let result = Config::load(Some(Path::new("/nonexistent/quill.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill.toml");
        std::fs::write(
            &path,
            r#"
[site]
title = "Design Patterns"

[content]
source_dir = "posts"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();
        assert_eq!(config.site.title, "Design Patterns");
        assert_eq!(config.content_resolved.source_dir, dir.path().join("posts"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_invalid_config_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill.toml");
        std::fs::write(
            &path,
            r#"
[content]
extensions = []
"#,
        )
        .unwrap();

        let result = Config::load(Some(path.as_path()), None);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
