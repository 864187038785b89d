//! Negated condition detection
//!
//! Flags `if`/`unless` whose condition is `(not x)` and rewrites them without
//! the negation. Three shapes are covered:
//! - blocks: `{{#if (not x)}}...{{/if}}`
//! - inline helpers: `{{if (not x) "a" "b"}}`
//! - sub-expressions: `(if (not x) "a" "b")`
//!
//! A condition such as `(not (or a b))` is left alone: turning it into
//! `unless (or a b)` is not always what the author meant.

use curly_core::syntax::{BlockNode, Expression, HelperCall};
use curly_core::{
    ConfigurableRule, FixBuilder, LogEntry, NodeKind, NodeRef, Result, Rule, RuleCategory,
    RuleContext, RuleMetadata, Severity, Span, ToggleConfig, parse_toggle_config,
};
use serde_json::Value;
use tracing::debug;

/// Rule ID for negated conditions
pub const NO_NEGATED_CONDITION: &str = "no-negated-condition";

pub const ERROR_MESSAGE_USE_UNLESS: &str =
    "Use {{unless condition}} instead of {{if (not condition)}}.";
pub const ERROR_MESSAGE_USE_IF: &str =
    "Use {{if condition}} instead of {{unless (not condition)}}.";
pub const ERROR_MESSAGE_FLIP_IF: &str =
    "Use {{if condition}} {{else}} {{/if}} instead of {{if (not condition)}} {{else}} {{/if}}.";

pub static METADATA: RuleMetadata = RuleMetadata {
    id: NO_NEGATED_CONDITION,
    description: "Disallow `if`/`unless` conditions wrapped in `(not ...)`",
    category: RuleCategory::Style,
    default_severity: Severity::Error,
    fixable: true,
    docs_url: None,
};

const VISITOR: &[NodeKind] = &[NodeKind::Block, NodeKind::Mustache, NodeKind::SubExpression];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conditional {
    If,
    Unless,
}

fn conditional(call: &impl HelperCall) -> Option<Conditional> {
    match call.helper_name()? {
        "if" => Some(Conditional::If),
        "unless" => Some(Conditional::Unless),
        _ => None,
    }
}

/// The `x` of a `(not x)` condition, when `x` is not itself a helper call
fn negated_operand(condition: &Expression) -> Option<&Expression> {
    let not = condition.as_sub_expression()?;
    if not.helper_name() != Some("not") || !not.hash.is_empty() {
        return None;
    }
    match not.params.as_slice() {
        [operand] if !operand.is_sub_expression() => Some(operand),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoNegatedCondition;

impl NoNegatedCondition {
    fn check_block(&self, block: &BlockNode, ctx: &mut RuleContext<'_>) {
        // `{{else if ...}}` segments are part of the outer block
        if block.chained {
            return;
        }
        let Some(helper) = conditional(block) else {
            return;
        };
        let [condition] = block.params.as_slice() else {
            return;
        };
        let Some(operand) = negated_operand(condition) else {
            return;
        };
        let Some(close) = &block.close else {
            return;
        };

        let mut fix = FixBuilder::new(ctx.source().text(), block.span.clone());
        let message = match helper {
            Conditional::If => match &block.inverse {
                Some(inverse) if inverse.chained => return,
                Some(inverse) => {
                    fix.swap(block.program.span.clone(), inverse.body.span.clone());
                    ERROR_MESSAGE_FLIP_IF
                }
                None => {
                    fix.replace(block.path.span(), "unless")
                        .replace(close.path_span.clone(), "unless");
                    ERROR_MESSAGE_USE_UNLESS
                }
            },
            Conditional::Unless => {
                fix.replace(block.path.span(), "if")
                    .replace(close.path_span.clone(), "if");
                ERROR_MESSAGE_USE_IF
            }
        };
        fix.replace(condition.span(), ctx.text(&operand.span()));

        debug!(rule = NO_NEGATED_CONDITION, span = ?block.span, "Negated block condition");
        ctx.log(LogEntry::new(message, block.span.clone(), NodeKind::Block).with_fix(fix.build()));
    }

    /// Inline and sub-expression forms: `if (not x) a [b]`
    fn check_inline(
        &self,
        call: &impl HelperCall,
        span: Span,
        kind: NodeKind,
        ctx: &mut RuleContext<'_>,
    ) {
        let Some(helper) = conditional(call) else {
            return;
        };
        let Some((condition, values)) = call.params().split_first() else {
            return;
        };
        let Some(operand) = negated_operand(condition) else {
            return;
        };

        let mut fix = FixBuilder::new(ctx.source().text(), span.clone());
        let message = match (helper, values) {
            (Conditional::If, [_]) => {
                fix.replace(call.path().span(), "unless");
                ERROR_MESSAGE_USE_UNLESS
            }
            (Conditional::If, [truthy, falsy]) => {
                fix.swap(truthy.span(), falsy.span());
                ERROR_MESSAGE_FLIP_IF
            }
            (Conditional::Unless, [_] | [_, _]) => {
                fix.replace(call.path().span(), "if");
                ERROR_MESSAGE_USE_IF
            }
            _ => return,
        };
        fix.replace(condition.span(), ctx.text(&operand.span()));

        debug!(rule = NO_NEGATED_CONDITION, span = ?span, "Negated inline condition");
        ctx.log(LogEntry::new(message, span, kind).with_fix(fix.build()));
    }
}

impl Rule for NoNegatedCondition {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn visitor(&self) -> &'static [NodeKind] {
        VISITOR
    }

    fn visit(&self, node: NodeRef<'_>, ctx: &mut RuleContext<'_>) {
        match node {
            NodeRef::Block(block) => self.check_block(block, ctx),
            NodeRef::Mustache(mustache) => {
                self.check_inline(mustache, mustache.span.clone(), NodeKind::Mustache, ctx)
            }
            NodeRef::SubExpression(sub) => {
                self.check_inline(sub, sub.span.clone(), NodeKind::SubExpression, ctx)
            }
            _ => {}
        }
    }
}

impl ConfigurableRule for NoNegatedCondition {
    type Config = ToggleConfig;

    fn parse_config(raw: Option<&Value>) -> Result<Self::Config> {
        parse_toggle_config(NO_NEGATED_CONDITION, raw)
    }

    fn from_config(config: Self::Config) -> Option<Self> {
        config.is_enabled().then_some(NoNegatedCondition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curly_core::syntax::parse;
    use curly_core::{SourceText, walk};

    fn check(source: &str) -> Vec<curly_core::Diagnostic> {
        let text = SourceText::new(source);
        let template = parse(source).unwrap();
        let rule = NoNegatedCondition;
        let mut ctx = RuleContext::new(rule.metadata(), &text);
        walk(&template, &mut |node| {
            if rule.visitor().contains(&node.kind()) {
                rule.visit(node, &mut ctx);
            }
        });
        ctx.take_diagnostics()
    }

    #[test]
    fn test_negated_operand() {
        let template = parse("{{if (not a) 'x'}}{{if (not (or a b)) 'x'}}{{if (not a b) 'x'}}")
            .unwrap();
        let operands: Vec<bool> = template
            .body
            .iter()
            .map(|statement| match statement {
                curly_core::syntax::Statement::Mustache(m) => {
                    negated_operand(&m.params[0]).is_some()
                }
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(operands, [true, false, false]);
    }

    #[test]
    fn test_block_fix_keeps_whitespace_control() {
        let diagnostics = check("{{~#if (not  foo.bar) ~}}x{{~/if~}}");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].fix.as_ref().unwrap().replacement,
            "{{~#unless foo.bar ~}}x{{~/unless~}}"
        );
    }

    #[test]
    fn test_inline_without_values_is_ignored() {
        assert!(check("{{if (not a)}}").is_empty());
        assert!(check("{{if (not a) 'x' 'y' 'z'}}").is_empty());
    }

    #[test]
    fn test_config() {
        assert!(NoNegatedCondition::parse_config(Some(&Value::Bool(true))).is_ok());
        assert!(NoNegatedCondition::parse_config(Some(&Value::from("on"))).is_err());
        assert!(NoNegatedCondition::from_config(ToggleConfig::Disabled).is_none());
    }
}
