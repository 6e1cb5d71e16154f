//! Language registry and per-language theme table.

use crate::HighlightError;

/// Languages recognized in article code fences.
///
/// The registry is fixed: any other fence tag is an error, never a
/// plain-text fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    /// Markup (`html`).
    Html,
    /// Stylesheets (`css`).
    Css,
    /// JavaScript (`js`).
    Js,
    /// TypeScript (`ts`).
    Ts,
    /// Component templates (`astro`).
    Astro,
    /// Structured data (`json`).
    Json,
    /// Data-science scripting (`python`), rendered with the alternate theme.
    Python,
}

impl Language {
    /// Every registered language, in registry order.
    pub const ALL: [Self; 7] = [
        Self::Html,
        Self::Css,
        Self::Js,
        Self::Ts,
        Self::Astro,
        Self::Json,
        Self::Python,
    ];

    /// Parse a fence tag into a registered language.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::UnknownLanguage`] for any tag outside the
    /// registry.
    pub fn parse(tag: &str) -> Result<Self, HighlightError> {
        match tag {
            "html" => Ok(Self::Html),
            "css" => Ok(Self::Css),
            "js" => Ok(Self::Js),
            "ts" => Ok(Self::Ts),
            "astro" => Ok(Self::Astro),
            "json" => Ok(Self::Json),
            "python" => Ok(Self::Python),
            other => Err(HighlightError::UnknownLanguage(other.to_owned())),
        }
    }

    /// The fence tag for this language.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::Js => "js",
            Self::Ts => "ts",
            Self::Astro => "astro",
            Self::Json => "json",
            Self::Python => "python",
        }
    }

    /// Token used to look up the grammar in the bundled syntax set.
    ///
    /// The bundled set carries no TypeScript or Astro grammar; those tags
    /// map to the JavaScript and HTML grammars.
    pub(crate) fn syntax_token(self) -> &'static str {
        match self {
            Self::Html | Self::Astro => "html",
            Self::Css => "css",
            Self::Js | Self::Ts => "js",
            Self::Json => "json",
            Self::Python => "python",
        }
    }

    /// Theme used for this language.
    ///
    /// Every language renders with [`ThemeId::Default`] except `python`,
    /// which uses the alternate theme.
    #[must_use]
    pub fn theme(self) -> ThemeId {
        match self {
            Self::Python => ThemeId::Alternate,
            Self::Html | Self::Css | Self::Js | Self::Ts | Self::Astro | Self::Json => {
                ThemeId::Default
            }
        }
    }
}

/// Identifier for one of the two pre-loaded themes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeId {
    /// Default theme for all languages without an override.
    Default,
    /// Alternate theme (currently only `python`).
    Alternate,
}

impl ThemeId {
    /// Name of the theme in the bundled theme set.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "base16-ocean.dark",
            Self::Alternate => "Solarized (dark)",
        }
    }

    /// Slug emitted as the `data-theme` attribute on rendered blocks.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Default => "ocean-dark",
            Self::Alternate => "solarized-dark",
        }
    }
}
