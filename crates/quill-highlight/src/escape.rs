//! Brace escaping for template-processed pages.

/// Replace every literal `{` and `}` with its named entity.
///
/// The enclosing template engine reserves braces for interpolation, so the
/// substitution runs over the entire rendered markup, not just text nodes.
/// Markup whose attribute values must contain literal braces cannot pass
/// through this step intact; this renderer emits none.
#[must_use]
pub fn escape_braces(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    for ch in markup.chars() {
        match ch {
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(ch),
        }
    }
    out
}
