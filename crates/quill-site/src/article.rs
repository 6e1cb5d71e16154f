//! Article front matter and metadata.

use std::path::Path;

use serde::Deserialize;

use crate::BuildError;

/// YAML front matter at the top of an article file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Article title. Falls back to the first H1, then the slug.
    pub title: Option<String>,
    /// Article category, used for layout selection.
    pub category: Option<String>,
    /// Publication date (ISO-8601 string, used for index ordering).
    pub date: Option<String>,
    /// Draft articles are skipped at build time.
    pub draft: bool,
}

/// A rendered article ready for layout wrapping.
#[derive(Debug)]
pub struct Article {
    /// URL slug, derived from the file stem.
    pub slug: String,
    /// Resolved title.
    pub title: String,
    /// Category from front matter.
    pub category: Option<String>,
    /// Publication date from front matter.
    pub date: Option<String>,
    /// Rendered body HTML.
    pub html: String,
}

/// Split an article file into front matter and body.
///
/// Front matter is optional: a file either starts with a `---` fence
/// followed by YAML and a closing `---` line, or the whole file is body.
///
/// # Errors
///
/// Returns [`BuildError::FrontMatter`] if the YAML between the fences does
/// not parse.
pub(crate) fn split_front_matter<'a>(
    path: &Path,
    source: &'a str,
) -> Result<(FrontMatter, &'a str), BuildError> {
    let Some(rest) = source.strip_prefix("---\n") else {
        return Ok((FrontMatter::default(), source));
    };

    let Some(end) = rest.find("\n---") else {
        return Ok((FrontMatter::default(), source));
    };

    let yaml = &rest[..end];
    let body = rest[end + 4..].trim_start_matches('\n');
    let front = serde_yaml::from_str(yaml).map_err(|source| BuildError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((front, body))
}

/// Derive the URL slug from an article file path.
pub(crate) fn slug_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_owned()
}
