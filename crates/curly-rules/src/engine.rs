//! Lint driver
//!
//! [`Linter`] validates the configuration once, then lints templates with a
//! fresh set of rule instances per template: one depth-first walk dispatches
//! every node to the rules that registered for its kind.

use curly_core::syntax::{Template, parse, walk};
use curly_core::{
    CurlyError, Diagnostic, Fix, FixPreview, LinterConfiguration, Result, Rule, RuleContext,
    SourceText, apply_fixes,
};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::builtin::{BuiltinRules, RuleDescriptor};

/// Upper bound on re-lint rounds in [`Linter::fix`]
const MAX_FIX_PASSES: usize = 10;

/// Diagnostics for one template and, after fixing, the fixed text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintOutcome {
    /// Findings in document order
    pub diagnostics: Vec<Diagnostic>,
    /// Re-serialised template, set by [`Linter::fix`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl LintOutcome {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_fixable).count()
    }

    /// Fixes carried by the diagnostics, in document order
    pub fn fixes(&self) -> Vec<Fix> {
        self.diagnostics
            .iter()
            .filter_map(|diagnostic| diagnostic.fix.clone())
            .collect()
    }
}

/// An enabled rule and the configuration it was validated with
#[derive(Debug, Clone)]
struct ActiveRule {
    descriptor: &'static RuleDescriptor,
    config: Value,
}

/// Template linter for a fixed rule configuration
#[derive(Debug, Clone, Default)]
pub struct Linter {
    active: Vec<ActiveRule>,
}

impl Linter {
    /// Validate every configured rule; configuration errors are returned before any linting
    pub fn new(config: &LinterConfiguration) -> Result<Self> {
        let mut active = Vec::new();

        for (rule_id, raw) in &config.rules {
            let descriptor = BuiltinRules::get(rule_id).ok_or_else(|| CurlyError::UnknownRule {
                rule_id: rule_id.clone(),
            })?;

            if (descriptor.build)(Some(raw))?.is_some() {
                debug!(rule = rule_id.as_str(), "Rule enabled");
                active.push(ActiveRule {
                    descriptor,
                    config: raw.clone(),
                });
            } else {
                debug!(rule = rule_id.as_str(), "Rule disabled");
            }
        }

        Ok(Self { active })
    }

    /// Ids of the enabled rules
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.active.iter().map(|rule| rule.descriptor.id()).collect()
    }

    fn instantiate(&self) -> Result<Vec<Box<dyn Rule>>> {
        let mut rules = Vec::with_capacity(self.active.len());
        for active in &self.active {
            if let Some(rule) = (active.descriptor.build)(Some(&active.config))? {
                rules.push(rule);
            }
        }
        Ok(rules)
    }

    /// Parse and lint one template
    pub fn lint(&self, source: &str) -> Result<LintOutcome> {
        let template = parse(source)?;
        self.lint_template(&SourceText::new(source), &template)
    }

    /// Lint a template that is already parsed
    pub fn lint_template(&self, source: &SourceText, template: &Template) -> Result<LintOutcome> {
        let rules = self.instantiate()?;
        let mut contexts: Vec<RuleContext<'_>> = rules
            .iter()
            .map(|rule| RuleContext::new(rule.metadata(), source))
            .collect();

        walk(template, &mut |node| {
            let kind = node.kind();
            for (rule, ctx) in rules.iter().zip(contexts.iter_mut()) {
                if rule.visitor().contains(&kind) {
                    trace!(rule = rule.metadata().id, ?kind, "Dispatching node");
                    rule.visit(node, ctx);
                }
            }
        });

        let mut diagnostics: Vec<Diagnostic> = contexts
            .iter_mut()
            .flat_map(RuleContext::take_diagnostics)
            .collect();
        diagnostics.sort_by_key(|diagnostic| diagnostic.span.start);

        debug!(
            rules = rules.len(),
            diagnostics = diagnostics.len(),
            "Linted template"
        );

        Ok(LintOutcome {
            diagnostics,
            output: None,
        })
    }

    /// Lint, then apply fixes until the template stops changing
    ///
    /// Each pass applies every non-overlapping fix against the text of that
    /// pass; fixes enclosed by an applied fix are picked up by the next pass.
    /// The diagnostics are those of the original template.
    pub fn fix(&self, source: &str) -> Result<LintOutcome> {
        let mut outcome = self.lint(source)?;
        let mut fixes = outcome.fixes();
        let mut current = source.to_string();
        let mut passes = 0;

        while !fixes.is_empty() {
            if passes == MAX_FIX_PASSES {
                warn!(passes, "Fixes did not settle; stopping");
                break;
            }
            let fixed = apply_fixes(&current, &fixes)?;
            if fixed.output == current {
                break;
            }
            current = fixed.output;
            passes += 1;
            fixes = self.lint(&current)?.fixes();
        }

        debug!(passes, "Fixed template");
        outcome.output = Some(current);
        Ok(outcome)
    }

    /// Diff between a template and its fixed form
    pub fn preview(&self, source: &str) -> Result<FixPreview> {
        let outcome = self.fix(source)?;
        let fixed = outcome.output.unwrap_or_else(|| source.to_string());
        Ok(FixPreview::new(source, fixed))
    }

    /// Lint independent templates in parallel; results keep input order
    pub fn lint_many<S>(&self, sources: &[S]) -> Vec<Result<LintOutcome>>
    where
        S: AsRef<str> + Sync,
    {
        sources
            .par_iter()
            .map(|source| self.lint(source.as_ref()))
            .collect()
    }
}
