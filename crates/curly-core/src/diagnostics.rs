//! Diagnostic model
//!
//! A [`Diagnostic`] is one finding of one rule. Its position always refers to
//! the start of the reported node's span in the original template, and its
//! `source` is the verbatim text of that span.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::autofix::Fix;
use crate::syntax::{NodeKind, SourceText, Span};

/// Severity levels for diagnostics
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational messages
    Info,
    /// Hints for improvements
    Hint,
    /// Warnings that should be addressed
    Warning,
    /// Errors that must be fixed
    #[default]
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One finding reported by a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,
    /// Verbatim original text of the reported span
    pub source: String,
    /// 1-based line of the span start
    pub line: usize,
    /// 0-based column of the span start, in characters
    pub column: usize,
    pub is_fixable: bool,
    /// Rule that produced this diagnostic
    pub rule_id: String,
    pub severity: Severity,
    /// Byte range of the reported node
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_kind: Option<NodeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl Diagnostic {
    /// Create a diagnostic for `span`, reading position and source text from `source`
    pub fn new(
        rule_id: impl Into<String>,
        message: impl Into<String>,
        source: &SourceText,
        span: Span,
    ) -> Self {
        let (line, column) = source.line_col(span.start);
        Self {
            message: message.into(),
            source: source.slice(&span).to_string(),
            line,
            column,
            is_fixable: false,
            rule_id: rule_id.into(),
            severity: Severity::default(),
            span,
            node_kind: None,
            fix: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_node_kind(mut self, kind: NodeKind) -> Self {
        self.node_kind = Some(kind);
        self
    }

    /// Attach a fix; marks the diagnostic fixable
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.is_fixable = true;
        self.fix = Some(fix);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}  {}  {}  {}",
            self.line, self.column, self.severity, self.message, self.rule_id
        )
    }
}
