//! Autofix application
//!
//! Fixes are byte-range replacements computed against the original template.
//! [`apply_fixes`] applies every non-overlapping fix in one pass over the
//! original buffer, so offsets recorded while linting stay valid no matter how
//! many fixes precede them.

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};
use tracing::{debug, error, warn};

use crate::syntax::Span;
use crate::{CurlyError, Result};

/// A replacement of one source range
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fix {
    /// Byte range `[start, end)` in the original template
    pub range: Span,
    /// Text that replaces the range
    pub replacement: String,
}

impl Fix {
    pub fn new(range: Span, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    /// Insert text at an offset without removing anything
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::new(offset..offset, text)
    }

    pub fn delete(range: Span) -> Self {
        Self::new(range, String::new())
    }

    /// Two fixes conflict when their ranges overlap or both start at the same offset
    pub fn conflicts_with(&self, other: &Fix) -> bool {
        self.range.start == other.range.start
            || (self.range.start < other.range.end && other.range.start < self.range.end)
    }

    fn fits(&self, source: &str) -> bool {
        self.range.start <= self.range.end
            && self.range.end <= source.len()
            && source.is_char_boundary(self.range.start)
            && source.is_char_boundary(self.range.end)
    }
}

/// Builds a single [`Fix`] for a node by splicing replacements into its original text
///
/// Replacements must lie inside the node range and must not overlap each other.
#[derive(Debug, Clone)]
pub struct FixBuilder<'s> {
    source: &'s str,
    range: Span,
    edits: Vec<(Span, String)>,
}

impl<'s> FixBuilder<'s> {
    pub fn new(source: &'s str, range: Span) -> Self {
        Self {
            source,
            range,
            edits: Vec::new(),
        }
    }

    pub fn replace(&mut self, span: Span, text: impl Into<String>) -> &mut Self {
        debug_assert!(
            span.start >= self.range.start && span.end <= self.range.end,
            "edit {span:?} is outside the fixed range {:?}",
            self.range
        );
        self.edits.push((span, text.into()));
        self
    }

    /// Original text of a span inside the source
    pub fn text(&self, span: &Span) -> &'s str {
        self.source.get(span.clone()).unwrap_or_default()
    }

    /// Exchange the text of two non-overlapping spans
    pub fn swap(&mut self, first: Span, second: Span) -> &mut Self {
        let first_text = self.text(&first).to_string();
        let second_text = self.text(&second).to_string();
        self.replace(first, second_text);
        self.replace(second, first_text)
    }

    pub fn build(mut self) -> Fix {
        self.edits.sort_by_key(|(span, _)| (span.start, span.end));

        let mut replacement = String::new();
        let mut cursor = self.range.start;
        for (span, text) in &self.edits {
            replacement.push_str(self.text(&(cursor..span.start)));
            replacement.push_str(text);
            cursor = span.end;
        }
        replacement.push_str(self.text(&(cursor..self.range.end)));

        Fix::new(self.range, replacement)
    }
}

/// Result of applying a set of fixes to one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The re-serialised template
    pub output: String,
    /// Fixes that were applied, in source order
    pub applied: Vec<Fix>,
    /// Fixes rejected because they overlap an applied fix
    pub skipped: Vec<Fix>,
}

impl FixOutcome {
    pub fn is_changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Apply all non-overlapping fixes simultaneously against `source`
///
/// Fixes are taken in order of their start offset; a fix that conflicts with
/// one already accepted is skipped. A fix whose range does not fit the buffer
/// is a bug in the rule that produced it and fails the whole call.
pub fn apply_fixes(source: &str, fixes: &[Fix]) -> Result<FixOutcome> {
    let mut ordered: Vec<&Fix> = fixes.iter().collect();
    ordered.sort_by_key(|fix| (fix.range.start, fix.range.end));

    let mut applied: Vec<Fix> = Vec::with_capacity(ordered.len());
    let mut skipped = Vec::new();

    for fix in ordered {
        let fits = fix.fits(source);
        debug_assert!(
            fits,
            "fix range {:?} is outside the source ({} bytes)",
            fix.range,
            source.len()
        );
        if !fits {
            error!(
                range = ?fix.range,
                len = source.len(),
                "Fix range is outside the source"
            );
            return Err(CurlyError::autofix_error(format!(
                "fix range {}..{} is outside the source ({} bytes)",
                fix.range.start,
                fix.range.end,
                source.len()
            )));
        }

        if applied.last().is_some_and(|last| last.conflicts_with(fix)) {
            warn!(range = ?fix.range, "Skipping fix that overlaps an earlier fix");
            skipped.push(fix.clone());
            continue;
        }
        applied.push(fix.clone());
    }

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    for fix in &applied {
        output.push_str(&source[cursor..fix.range.start]);
        output.push_str(&fix.replacement);
        cursor = fix.range.end;
    }
    output.push_str(&source[cursor..]);

    debug!(
        applied = applied.len(),
        skipped = skipped.len(),
        "Applied fixes"
    );

    Ok(FixOutcome {
        output,
        applied,
        skipped,
    })
}

/// Before/after view of a fixed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixPreview {
    pub original: String,
    pub fixed: String,
    /// Line diff, `-`/`+`/` ` prefixed
    pub diff: String,
}

impl FixPreview {
    pub fn new(original: impl Into<String>, fixed: impl Into<String>) -> Self {
        let original = original.into();
        let fixed = fixed.into();
        let diff = render_diff(&original, &fixed);
        Self {
            original,
            fixed,
            diff,
        }
    }

    pub fn has_changes(&self) -> bool {
        self.original != self.fixed
    }
}

fn render_diff(original: &str, fixed: &str) -> String {
    let diff = TextDiff::from_lines(original, fixed);
    let mut output = String::new();

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => '-',
            ChangeTag::Insert => '+',
            ChangeTag::Equal => ' ',
        };
        output.push(sign);
        output.push_str(change.value());
        if change.missing_newline() {
            output.push('\n');
        }
    }

    output
}
