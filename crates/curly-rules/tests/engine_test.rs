//! Tests for the lint driver across both built-in rules

use curly_core::{CurlyError, ErrorKind, LinterConfiguration};
use curly_rules::{Linter, NO_NEGATED_CONDITION, NO_UNKNOWN_ARGUMENTS_FOR_BUILTIN_COMPONENTS};
use serde_json::json;

const TEMPLATE: &str = "{{#if (not this.ready)}}\n  <Input @valuee={{this.content}} @bubbles={{false}} />\n{{/if}}\n";

fn all_rules() -> LinterConfiguration {
    LinterConfiguration::new()
        .with_rule(NO_NEGATED_CONDITION, true)
        .with_rule(NO_UNKNOWN_ARGUMENTS_FOR_BUILTIN_COMPONENTS, true)
}

#[test]
fn unknown_rule_is_rejected() {
    let config = all_rules().with_rule("no-such-rule", true);
    let err = Linter::new(&config).unwrap_err();
    assert!(matches!(&err, CurlyError::UnknownRule { rule_id } if rule_id == "no-such-rule"));
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn invalid_rule_value_is_rejected_before_linting() {
    let config = all_rules().with_rule(NO_NEGATED_CONDITION, json!("yes"));
    let err = Linter::new(&config).unwrap_err();
    let CurlyError::Config { rule_id, message } = &err else {
        panic!("expected a rule configuration error, got {err:?}");
    };
    assert_eq!(rule_id, NO_NEGATED_CONDITION);
    assert_eq!(
        message,
        "The no-negated-condition rule accepts one of the following values.\n  * boolean - `true` to enable / `false` to disable\nYou specified `\"yes\"`"
    );
}

#[test]
fn configuration_with_comments_builds_a_linter() -> anyhow::Result<()> {
    let config = LinterConfiguration::from_jsonc_str(
        r#"{
            // style
            "rules": {
                "no-negated-condition": true,
                "no-unknown-arguments-for-builtin-components": false,
            },
        }"#,
    )?;
    let linter = Linter::new(&config)?;
    assert_eq!(linter.rule_ids(), [NO_NEGATED_CONDITION]);
    Ok(())
}

#[test]
fn diagnostics_from_all_rules_are_in_document_order() -> anyhow::Result<()> {
    let linter = Linter::new(&all_rules())?;
    let outcome = linter.lint(TEMPLATE)?;

    let report = outcome
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(report, @r###"
    1:0  error  Use {{unless condition}} instead of {{if (not condition)}}.  no-negated-condition
    2:9  error  "@valuee" is not a known argument for the <Input /> component. Did you mean "@value"?  no-unknown-arguments-for-builtin-components
    2:34  error  Passing the "@bubbles" argument to <Input /> is deprecated.  no-unknown-arguments-for-builtin-components
    "###);
    assert_eq!(outcome.fixable_count(), 1);
    Ok(())
}

#[test]
fn fix_output_is_stable_after_one_pass() -> anyhow::Result<()> {
    let linter = Linter::new(&all_rules())?;
    let outcome = linter.fix(TEMPLATE)?;
    let fixed = outcome.output.as_deref().expect("fix sets output");
    assert_eq!(
        fixed,
        "{{#unless this.ready}}\n  <Input @valuee={{this.content}} @bubbles={{false}} />\n{{/unless}}\n"
    );

    let second = linter.fix(fixed)?;
    assert_eq!(second.output.as_deref(), Some(fixed));
    assert_eq!(second.fixable_count(), 0);
    assert_eq!(second.diagnostics.len(), 2);
    Ok(())
}

#[test]
fn fixes_inside_one_element_are_applied_together() -> anyhow::Result<()> {
    let linter = Linter::new(&all_rules())?;
    let outcome =
        linter.fix(r#"<LinkTo @route="a" @elementId="x" @ariaRole="link" @click={{this.go}} />"#)?;
    assert_eq!(outcome.fixable_count(), 3);
    assert_eq!(
        outcome.output.as_deref(),
        Some(r#"<LinkTo @route="a" id="x" role="link" {{on "click" this.go}} />"#)
    );
    Ok(())
}

#[test]
fn preview_shows_changed_lines() -> anyhow::Result<()> {
    let linter = Linter::new(&all_rules())?;
    let preview = linter.preview(TEMPLATE)?;
    assert!(preview.has_changes());
    insta::assert_snapshot!(preview.diff, @r###"
    -{{#if (not this.ready)}}
    +{{#unless this.ready}}
       <Input @valuee={{this.content}} @bubbles={{false}} />
    -{{/if}}
    +{{/unless}}
    "###);

    let clean = linter.preview("<p>{{this.text}}</p>")?;
    assert!(!clean.has_changes());
    Ok(())
}

#[test]
fn lint_many_keeps_input_order() -> anyhow::Result<()> {
    let linter = Linter::new(&all_rules())?;
    let templates = [
        "{{if (not a) 'x'}}",
        "<p>fine</p>",
        "{{#if a}}",
        r#"<LinkTo @model={{this.model}} />"#,
    ];

    let results = linter.lint_many(&templates);
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].as_ref().map(|o| o.diagnostics.len()).ok(), Some(1));
    assert!(results[1].as_ref().is_ok_and(|o| o.is_clean()));
    assert!(matches!(results[2], Err(CurlyError::Parse { .. })));
    let link_to = results[3].as_ref().map_err(|e| anyhow::anyhow!("{e}"))?;
    assert_eq!(link_to.diagnostics[0].source, "LinkTo");
    Ok(())
}

#[test]
fn outcome_serializes_with_camel_case_fields() -> anyhow::Result<()> {
    let linter = Linter::new(&all_rules())?;
    let outcome = linter.fix("{{if (not a) 'x'}}")?;
    let value = serde_json::to_value(&outcome)?;

    assert_eq!(value["output"], json!("{{unless a 'x'}}"));
    let diagnostic = &value["diagnostics"][0];
    assert_eq!(diagnostic["ruleId"], json!(NO_NEGATED_CONDITION));
    assert_eq!(diagnostic["isFixable"], json!(true));
    assert_eq!(diagnostic["column"], json!(0));
    assert_eq!(diagnostic["fix"]["replacement"], json!("{{unless a 'x'}}"));
    Ok(())
}
