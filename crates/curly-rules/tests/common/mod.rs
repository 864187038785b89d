//! Shared harness for rule tests

#![allow(dead_code)]

use curly_core::LinterConfiguration;
use curly_rules::Linter;

/// What a single diagnostic is expected to look like
#[derive(Debug, Clone)]
pub struct Expected {
    pub message: String,
    pub source: &'static str,
    pub line: usize,
    pub column: usize,
    pub is_fixable: bool,
}

impl Expected {
    pub fn new(message: impl Into<String>, source: &'static str, column: usize) -> Self {
        Self {
            message: message.into(),
            source,
            line: 1,
            column,
            is_fixable: false,
        }
    }

    pub fn fixable(mut self) -> Self {
        self.is_fixable = true;
        self
    }
}

/// Linter with only `rule_id` enabled
pub fn linter_for(rule_id: &str) -> Linter {
    let config = LinterConfiguration::new().with_rule(rule_id, true);
    Linter::new(&config).expect("rule should accept `true`")
}

/// Every template must lint clean and survive fixing unchanged
pub fn assert_good(rule_id: &str, templates: &[&str]) {
    let linter = linter_for(rule_id);
    for template in templates {
        let outcome = linter
            .fix(template)
            .unwrap_or_else(|err| panic!("failed to lint {template:?}: {err}"));
        assert!(
            outcome.is_clean(),
            "expected no diagnostics for {template:?}, got {:#?}",
            outcome.diagnostics
        );
        assert_eq!(outcome.output.as_deref(), Some(*template));
    }
}

/// Lint `template`, compare the diagnostics field by field, then check the
/// fixed text and that it lints clean
pub fn assert_bad(rule_id: &str, template: &str, expected: &[Expected], fixed: Option<&str>) {
    let linter = linter_for(rule_id);
    let outcome = linter
        .fix(template)
        .unwrap_or_else(|err| panic!("failed to lint {template:?}: {err}"));

    assert_eq!(
        outcome.diagnostics.len(),
        expected.len(),
        "diagnostic count for {template:?}: {:#?}",
        outcome.diagnostics
    );
    for (actual, expected) in outcome.diagnostics.iter().zip(expected) {
        assert_eq!(actual.message, expected.message, "message in {template:?}");
        assert_eq!(actual.source, expected.source, "source in {template:?}");
        assert_eq!(
            (actual.line, actual.column),
            (expected.line, expected.column),
            "position in {template:?}"
        );
        assert_eq!(
            actual.is_fixable, expected.is_fixable,
            "fixability in {template:?}"
        );
        assert_eq!(actual.rule_id, rule_id);
    }

    let output = outcome.output.as_deref().expect("fix sets output");
    match fixed {
        Some(fixed) => {
            assert_eq!(output, fixed, "fixed text of {template:?}");
            let relinted = linter
                .lint(fixed)
                .unwrap_or_else(|err| panic!("fixed text does not parse {fixed:?}: {err}"));
            assert!(
                relinted.is_clean(),
                "fixed text {fixed:?} still has diagnostics: {:#?}",
                relinted.diagnostics
            );
        }
        None => assert_eq!(output, template, "unfixable template changed"),
    }
}
