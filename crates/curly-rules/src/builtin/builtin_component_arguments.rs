//! Argument validation for built-in components
//!
//! Checks `<Input>`, `<Textarea>` and `<LinkTo>` invocations against the
//! schemas in [`crate::component_registry`]: unknown arguments (with a
//! "did you mean" suggestion), missing required arguments, conflicting
//! arguments, and deprecated arguments and events with migration fixes.

use curly_core::syntax::{AttrNode, AttrValue, ElementNode, HelperCall};
use curly_core::{
    ConfigurableRule, Fix, LogEntry, NodeKind, NodeRef, Result, Rule, RuleCategory, RuleContext,
    RuleMetadata, Severity, ToggleConfig, parse_toggle_config,
};
use serde_json::Value;
use tracing::debug;

use crate::component_registry::{ComponentSchema, DeprecationFix, component_schema};

/// Rule ID for argument validation of built-in components
pub const NO_UNKNOWN_ARGUMENTS_FOR_BUILTIN_COMPONENTS: &str =
    "no-unknown-arguments-for-builtin-components";

/// Largest edit distance for which a known argument is suggested
pub const MAX_SUGGESTION_DISTANCE: usize = 2;

pub static METADATA: RuleMetadata = RuleMetadata {
    id: NO_UNKNOWN_ARGUMENTS_FOR_BUILTIN_COMPONENTS,
    description: "Disallow unknown, missing, conflicting and deprecated arguments on built-in components",
    category: RuleCategory::Correctness,
    default_severity: Severity::Error,
    fixable: true,
    docs_url: None,
};

const VISITOR: &[NodeKind] = &[NodeKind::Element];

/// Message for an argument the component does not accept
pub fn unknown_argument_message(component: &str, argument: &str, suggestion: Option<&str>) -> String {
    let mut message = format!("\"@{argument}\" is not a known argument for the <{component} /> component.");
    if let Some(candidate) = suggestion {
        message.push_str(&format!(" Did you mean \"@{candidate}\"?"));
    }
    message
}

/// Message for a required group with no member present
pub fn required_message(component: &str, group: &[&str]) -> String {
    format!(
        "One of the arguments {} is required for the <{component} /> component.",
        quoted_arguments(group)
    )
}

/// Message for one member of a conflicting group
pub fn conflict_message(component: &str, argument: &str, group: &[&str]) -> String {
    format!(
        "\"@{argument}\" conflicts with other arguments of the <{component} /> component; only one of {} may be passed.",
        quoted_arguments(group)
    )
}

fn quoted_arguments(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("\"@{name}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Nearest known argument within [`MAX_SUGGESTION_DISTANCE`]; ties go to the earlier one
pub fn suggest_argument<'a>(schema: &'a ComponentSchema, argument: &str) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;
    for &candidate in &schema.known_arguments {
        let distance = edit_distance(argument, candidate);
        if distance <= MAX_SUGGESTION_DISTANCE && best.is_none_or(|(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Levenshtein distance over chars
fn edit_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    let mut previous: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut current = vec![0; s2_chars.len() + 1];

    for (i, c1) in s1_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[s2_chars.len()]
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoUnknownArgumentsForBuiltinComponents;

impl NoUnknownArgumentsForBuiltinComponents {
    fn check_element(
        &self,
        element: &ElementNode,
        schema: &ComponentSchema,
        ctx: &mut RuleContext<'_>,
    ) {
        let component = schema.name;

        for group in &schema.required_one_of {
            if !group.iter().any(|name| element.has_argument(name)) {
                ctx.log(LogEntry::new(
                    required_message(component, group),
                    element.tag_span.clone(),
                    NodeKind::Element,
                ));
            }
        }

        for attribute in element.arguments() {
            let Some(name) = attribute.argument_name() else {
                continue;
            };

            if let Some(deprecation) = schema.deprecation(name) {
                let fix = deprecation
                    .fix
                    .and_then(|fix| self.migration_fix(element, attribute, fix, ctx));
                let mut entry = LogEntry::new(
                    deprecation.message.clone(),
                    attribute.name_span.clone(),
                    NodeKind::Attribute,
                );
                if let Some(fix) = fix {
                    entry = entry.with_fix(fix);
                }
                ctx.log(entry);
                continue;
            }

            if !schema.is_known(name) {
                let suggestion = suggest_argument(schema, name);
                debug!(component, argument = name, ?suggestion, "Unknown argument");
                ctx.log(LogEntry::new(
                    unknown_argument_message(component, name, suggestion),
                    attribute.name_span.clone(),
                    NodeKind::Attribute,
                ));
                continue;
            }

            for group in &schema.conflict_groups {
                let present = group
                    .iter()
                    .filter(|member| element.has_argument(member))
                    .count();
                if present > 1 && group.contains(&name) {
                    ctx.log(LogEntry::new(
                        conflict_message(component, name, group),
                        attribute.name_span.clone(),
                        NodeKind::Attribute,
                    ));
                }
            }
        }
    }

    /// Rewrite a deprecated argument in place
    ///
    /// No fix when the element already carries the target attribute.
    fn migration_fix(
        &self,
        element: &ElementNode,
        attribute: &AttrNode,
        fix: DeprecationFix,
        ctx: &RuleContext<'_>,
    ) -> Option<Fix> {
        match fix {
            DeprecationFix::Attribute(name) if element.has_attribute(name) => None,
            DeprecationFix::Attribute(name) => Some(Fix::new(attribute.name_span.clone(), name)),
            DeprecationFix::Event(event) => {
                let handler = event_handler(attribute, ctx)?;
                Some(Fix::new(
                    attribute.span.clone(),
                    format!("{{{{on \"{event}\" {handler}}}}}"),
                ))
            }
        }
    }
}

/// The value of an event argument as a modifier argument
fn event_handler(attribute: &AttrNode, ctx: &RuleContext<'_>) -> Option<String> {
    match &attribute.value {
        AttrValue::Valueless => None,
        AttrValue::Mustache(mustache) => {
            let start = mustache.path().span().start;
            let end = mustache
                .hash()
                .last()
                .map(|pair| pair.span.end)
                .or_else(|| mustache.params().last().map(|param| param.span().end))
                .unwrap_or_else(|| mustache.path().span().end);
            let call = ctx.text(&(start..end));
            if mustache.params().is_empty() && mustache.hash().is_empty() {
                Some(call.to_string())
            } else {
                Some(format!("({call})"))
            }
        }
        AttrValue::Text(text) => {
            let raw = ctx.text(&text.span);
            if raw.starts_with(['"', '\'']) {
                Some(raw.to_string())
            } else {
                string_literal(&text.chars)
            }
        }
        AttrValue::Concat(concat) => Some(ctx.text(&concat.span).to_string()),
    }
}

/// Quote an unquoted attribute value so it stays a string in the modifier
fn string_literal(value: &str) -> Option<String> {
    if !value.contains('"') {
        Some(format!("\"{value}\""))
    } else if !value.contains('\'') {
        Some(format!("'{value}'"))
    } else {
        None
    }
}

impl Rule for NoUnknownArgumentsForBuiltinComponents {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn visitor(&self) -> &'static [NodeKind] {
        VISITOR
    }

    fn visit(&self, node: NodeRef<'_>, ctx: &mut RuleContext<'_>) {
        let NodeRef::Element(element) = node else {
            return;
        };
        if let Some(schema) = component_schema(&element.tag) {
            self.check_element(element, schema, ctx);
        }
    }
}

impl ConfigurableRule for NoUnknownArgumentsForBuiltinComponents {
    type Config = ToggleConfig;

    fn parse_config(raw: Option<&Value>) -> Result<Self::Config> {
        parse_toggle_config(NO_UNKNOWN_ARGUMENTS_FOR_BUILTIN_COMPONENTS, raw)
    }

    fn from_config(config: Self::Config) -> Option<Self> {
        config
            .is_enabled()
            .then_some(NoUnknownArgumentsForBuiltinComponents)
    }
}
