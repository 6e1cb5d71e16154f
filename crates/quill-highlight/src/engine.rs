//! The highlighting engine handle.

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;

use crate::HighlightError;
use crate::annotate::strip_markers;
use crate::block::{BlockTransform, CodeBlock, Line, decoration_pipeline};
use crate::escape::escape_braces;
use crate::language::{Language, ThemeId};

/// Constructed, ready-to-use highlighting engine.
///
/// `new` loads the syntax grammars and both themes exactly once and verifies
/// that every registered language resolves to a bundled grammar, so a handle
/// in scope is always ready to render. The host constructs it at startup;
/// there is no lazy initialization path and no teardown.
///
/// Render calls share only the read-only tables and may run concurrently
/// without coordination.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    default_theme: Theme,
    alternate_theme: Theme,
    transforms: Vec<Box<dyn BlockTransform>>,
}

impl Highlighter {
    /// Load syntax grammars and themes, returning a ready handle.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::MissingSyntax`] or
    /// [`HighlightError::MissingTheme`] if the bundled tables lack an entry
    /// the registry requires. Both indicate a build misconfiguration, not a
    /// recoverable condition.
    pub fn new() -> Result<Self, HighlightError> {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        for language in Language::ALL {
            if syntaxes.find_syntax_by_token(language.syntax_token()).is_none() {
                return Err(HighlightError::MissingSyntax(language.syntax_token()));
            }
        }

        let mut themes = ThemeSet::load_defaults();
        let default_theme = take_theme(&mut themes, ThemeId::Default)?;
        let alternate_theme = take_theme(&mut themes, ThemeId::Alternate)?;

        Ok(Self {
            syntaxes,
            default_theme,
            alternate_theme,
            transforms: decoration_pipeline(),
        })
    }

    /// Render a code sample to decorated, themed HTML.
    ///
    /// Annotation markers are stripped from the source, each line is
    /// highlighted with the language's theme, the decoration pipeline runs
    /// in order, and the serialized markup has its braces entity-escaped.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::UnknownLanguage`] for tags outside the
    /// registry and propagates engine failures unmodified.
    pub fn render(&self, source: &str, tag: &str) -> Result<String, HighlightError> {
        let language = Language::parse(tag)?;
        let syntax = self
            .syntaxes
            .find_syntax_by_token(language.syntax_token())
            .ok_or(HighlightError::MissingSyntax(language.syntax_token()))?;

        let mut highlighter = HighlightLines::new(syntax, self.theme(language.theme()));
        let mut block = CodeBlock::new(language);
        for line in strip_markers(source) {
            // The newline-aware grammars require the terminator.
            let text = format!("{}\n", line.text);
            let regions = highlighter.highlight_line(&text, &self.syntaxes)?;
            let html = styled_line_to_highlighted_html(&regions, IncludeBackground::No)?;
            block.lines.push(Line::new(html, line.marker));
        }

        for stage in &self.transforms {
            stage.apply(&mut block);
        }

        Ok(escape_braces(&block.to_html()))
    }

    fn theme(&self, id: ThemeId) -> &Theme {
        match id {
            ThemeId::Default => &self.default_theme,
            ThemeId::Alternate => &self.alternate_theme,
        }
    }
}

fn take_theme(set: &mut ThemeSet, id: ThemeId) -> Result<Theme, HighlightError> {
    set.themes
        .remove(id.name())
        .ok_or(HighlightError::MissingTheme(id.name()))
}
