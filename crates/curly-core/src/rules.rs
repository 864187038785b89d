//! Rule framework
//!
//! Every rule declares the node kinds it wants to see ([`Rule::visitor`]) and
//! receives those nodes one at a time during a single traversal. Findings go
//! through [`RuleContext::log`], which completes them with position and source
//! text. Configuration is parsed up front by [`ConfigurableRule::parse_config`]
//! into a closed per-rule type.

use serde::Serialize;
use serde_json::Value;

use crate::autofix::Fix;
use crate::diagnostics::{Diagnostic, Severity};
use crate::syntax::{NodeKind, NodeRef, SourceText, Span};
use crate::{CurlyError, Result};

/// Categories for organizing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Usage that is wrong regardless of style
    Correctness,
    /// Patterns that are legal but likely mistakes
    Suspicious,
    /// Readability preferences
    Style,
    /// Use of deprecated APIs
    Deprecated,
}

impl RuleCategory {
    pub fn slug(&self) -> &'static str {
        match self {
            RuleCategory::Correctness => "correctness",
            RuleCategory::Suspicious => "suspicious",
            RuleCategory::Style => "style",
            RuleCategory::Deprecated => "deprecated",
        }
    }
}

/// Static description of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMetadata {
    /// Unique identifier, as used in configuration
    pub id: &'static str,
    pub description: &'static str,
    pub category: RuleCategory,
    pub default_severity: Severity,
    /// Whether the rule can produce fixes
    pub fixable: bool,
    pub docs_url: Option<&'static str>,
}

/// A lint rule
pub trait Rule: Send + Sync {
    fn metadata(&self) -> &RuleMetadata;

    /// Node kinds this rule wants to visit
    fn visitor(&self) -> &'static [NodeKind];

    /// Inspect one node whose kind is listed in [`Rule::visitor`]
    fn visit(&self, node: NodeRef<'_>, ctx: &mut RuleContext<'_>);
}

/// A rule constructed from a validated configuration value
pub trait ConfigurableRule: Rule + Sized {
    /// Closed set of accepted configuration shapes
    type Config;

    /// Validate the raw configuration; `None` means the rule is not configured
    fn parse_config(raw: Option<&Value>) -> Result<Self::Config>;

    /// Build the rule, or `None` when the configuration disables it
    fn from_config(config: Self::Config) -> Option<Self>;
}

/// Configuration of a rule that can only be switched on or off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleConfig {
    Enabled,
    #[default]
    Disabled,
}

impl ToggleConfig {
    pub fn is_enabled(self) -> bool {
        self == ToggleConfig::Enabled
    }
}

/// Accepted-shape line for boolean toggles
pub const BOOLEAN_SHAPE: &str = "boolean - `true` to enable / `false` to disable";

/// Parse a boolean on/off rule configuration
pub fn parse_toggle_config(rule_id: &str, raw: Option<&Value>) -> Result<ToggleConfig> {
    match raw {
        None | Some(Value::Bool(false)) => Ok(ToggleConfig::Disabled),
        Some(Value::Bool(true)) => Ok(ToggleConfig::Enabled),
        Some(other) => Err(CurlyError::config_error(
            rule_id,
            config_error_message(rule_id, &[BOOLEAN_SHAPE], other),
        )),
    }
}

/// Error text listing every accepted shape and echoing the rejected value
pub fn config_error_message(rule_id: &str, shapes: &[&str], raw: &Value) -> String {
    let mut message = format!("The {rule_id} rule accepts one of the following values.\n");
    for shape in shapes {
        message.push_str("  * ");
        message.push_str(shape);
        message.push('\n');
    }
    message.push_str(&format!("You specified `{raw}`"));
    message
}

/// A finding as reported by a rule, before position information is filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    /// Span of the node the finding is about
    pub span: Span,
    pub node_kind: NodeKind,
    pub fix: Option<Fix>,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, span: Span, node_kind: NodeKind) -> Self {
        Self {
            message: message.into(),
            span,
            node_kind,
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }
}

/// Output of one rule instance over one template
pub struct RuleContext<'s> {
    rule_id: &'static str,
    severity: Severity,
    source: &'s SourceText,
    diagnostics: Vec<Diagnostic>,
}

impl<'s> RuleContext<'s> {
    pub fn new(metadata: &RuleMetadata, source: &'s SourceText) -> Self {
        Self {
            rule_id: metadata.id,
            severity: metadata.default_severity,
            source,
            diagnostics: Vec::new(),
        }
    }

    pub fn rule_id(&self) -> &'static str {
        self.rule_id
    }

    pub fn source(&self) -> &'s SourceText {
        self.source
    }

    /// Original text of a span
    pub fn text(&self, span: &Span) -> &'s str {
        self.source.slice(span)
    }

    /// Record a finding
    pub fn log(&mut self, entry: LogEntry) {
        let mut diagnostic = Diagnostic::new(self.rule_id, entry.message, self.source, entry.span)
            .with_severity(self.severity)
            .with_node_kind(entry.node_kind);
        if let Some(fix) = entry.fix {
            diagnostic = diagnostic.with_fix(fix);
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
