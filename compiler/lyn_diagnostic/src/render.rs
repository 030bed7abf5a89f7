//! Plain-text rendering of diagnostics against their source.

use crate::Diagnostic;

/// Render one diagnostic with the offending source line and a caret.
///
/// `source` is the text of the diagnostic's file. Unanchored diagnostics
/// (dummy span) render without a source excerpt.
pub fn render(diagnostic: &Diagnostic, source: &str) -> String {
    let mut out = diagnostic.to_string();
    if diagnostic.span.is_empty() {
        return out;
    }

    let offset = diagnostic.span.start as usize;
    let line_start = source[..offset.min(source.len())]
        .rfind('\n')
        .map_or(0, |pos| pos + 1);
    let line_end = source[line_start..]
        .find('\n')
        .map_or(source.len(), |pos| line_start + pos);
    let line_number = source[..line_start].matches('\n').count() + 1;
    let column = offset.saturating_sub(line_start);

    let line = &source[line_start..line_end];
    let width = (diagnostic.span.len() as usize).clamp(1, line.len().saturating_sub(column).max(1));
    out.push_str(&format!(
        "\n  --> line {line_number}, column {}\n  {line}\n  {}{}",
        column + 1,
        " ".repeat(column),
        "^".repeat(width)
    ));
    out
}
