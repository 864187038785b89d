//! Template source text and offset-to-position mapping

use super::Span;

/// Start offsets of every line in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.char_indices()
                .filter(|(_, ch)| *ch == '\n')
                .map(|(offset, _)| offset + 1),
        );
        Self { line_starts }
    }

    /// Map a byte offset to a 1-based line and a 0-based column counted in chars
    pub fn line_col(&self, text: &str, offset: usize) -> (usize, usize) {
        let offset = offset.min(text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = text
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        (line + 1, column)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// A template's text together with its line index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    text: String,
    index: LineIndex,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let index = LineIndex::new(&text);
        Self { text, index }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Verbatim text of a span; empty when the span is not valid for this text
    pub fn slice(&self, span: &Span) -> &str {
        self.text.get(span.clone()).unwrap_or_default()
    }

    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        self.index.line_col(&self.text, offset)
    }

    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_single_line() {
        let source = SourceText::new("<Input @valuee={{this.content}} />");
        assert_eq!(source.line_col(0), (1, 0));
        assert_eq!(source.line_col(7), (1, 7));
    }

    #[test]
    fn test_line_col_multi_line() {
        let source = SourceText::new("{{#if a}}\n  <img>\n{{/if}}");
        assert_eq!(source.line_count(), 3);
        assert_eq!(source.line_col(10), (2, 0));
        assert_eq!(source.line_col(12), (2, 2));
        assert_eq!(source.line_col(18), (3, 0));
    }

    #[test]
    fn test_column_counts_chars() {
        let source = SourceText::new("é {{x}}");
        assert_eq!(source.line_col(3), (1, 2));
    }

    #[test]
    fn test_slice() {
        let source = SourceText::new("<LinkTo @route=\"foo\" />");
        assert_eq!(source.slice(&(1..7)), "LinkTo");
        assert_eq!(source.slice(&(100..200)), "");
    }
}
