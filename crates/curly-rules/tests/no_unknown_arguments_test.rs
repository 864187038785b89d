//! Tests for the no-unknown-arguments-for-builtin-components rule

mod common;

use common::{Expected, assert_bad, assert_good};
use curly_rules::NO_UNKNOWN_ARGUMENTS_FOR_BUILTIN_COMPONENTS as RULE;
use curly_rules::builtin::builtin_component_arguments::{
    conflict_message, required_message, unknown_argument_message,
};
use curly_rules::component_registry::deprecation_message;
use curly_rules::DeprecationFix;

#[test]
fn known_arguments_are_allowed() {
    assert_good(
        RULE,
        &[
            r#"<Input @value="foo" />"#,
            r#"<Textarea @value="hello" />"#,
            r#"<LinkTo @route="info" @model={{this.model}} />"#,
            r#"<LinkTo @route="info" />"#,
            r#"<LinkTo @query={{hash foo=bar}} />"#,
        ],
    );
}

#[test]
fn other_elements_and_plain_attributes_are_ignored() {
    assert_good(
        RULE,
        &[
            r#"<MyInput @valuee={{this.content}} />"#,
            r#"<input value="foo" disabled>"#,
            r#"<Input @type="checkbox" @checked={{this.on}} class="toggle" ...attributes />"#,
            r#"<LinkTo @route="info" title="Info" {{on "click" this.track}}>Info</LinkTo>"#,
        ],
    );
}

#[test]
fn unknown_argument_with_suggestion() {
    assert_bad(
        RULE,
        "<Input @valuee={{this.content}} />",
        &[Expected::new(
            unknown_argument_message("Input", "valuee", Some("value")),
            "@valuee",
            7,
        )],
        None,
    );
    assert_bad(
        RULE,
        "<Textarea @valuee={{this.content}} />",
        &[Expected::new(
            unknown_argument_message("Textarea", "valuee", Some("value")),
            "@valuee",
            10,
        )],
        None,
    );
    assert_bad(
        RULE,
        r#"<LinkTo @route="foo" @madel={{this.content}} />"#,
        &[Expected::new(
            "\"@madel\" is not a known argument for the <LinkTo /> component. Did you mean \"@model\"?",
            "@madel",
            21,
        )],
        None,
    );
}

#[test]
fn unknown_argument_without_close_match() {
    assert_bad(
        RULE,
        r#"<LinkTo @route="foo" @valuee={{this.content}} />"#,
        &[Expected::new(
            "\"@valuee\" is not a known argument for the <LinkTo /> component.",
            "@valuee",
            21,
        )],
        None,
    );
    assert_bad(
        RULE,
        r#" <LinkTo class="auk-search-results-list__item" @route={{@route}} @models={{this.models}} @random="test" @query={{@query}} ...attributes >Hello</LinkTo>"#,
        &[Expected::new(
            unknown_argument_message("LinkTo", "random", None),
            "@random",
            89,
        )],
        None,
    );
}

#[test]
fn missing_required_argument() {
    assert_bad(
        RULE,
        "<LinkTo @model={{this.model}} />",
        &[Expected::new(
            required_message("LinkTo", &["route", "query"]),
            "LinkTo",
            1,
        )],
        None,
    );
}

#[test]
fn conflicting_arguments_are_each_reported() {
    let group = ["model", "models"];
    assert_bad(
        RULE,
        r#"<LinkTo @route="info" @model={{this.model}} @models={{this.models}} />"#,
        &[
            Expected::new(conflict_message("LinkTo", "model", &group), "@model", 22),
            Expected::new(conflict_message("LinkTo", "models", &group), "@models", 44),
        ],
        None,
    );
}

#[test]
fn deprecated_link_to_arguments() {
    assert_bad(
        RULE,
        r#"<LinkTo @route="info" @model={{this.model}} @tagName="button" />"#,
        &[Expected::new(
            "Passing the \"@tagName\" argument to <LinkTo /> is deprecated.",
            "@tagName",
            44,
        )],
        None,
    );
    assert_bad(
        RULE,
        r#"<LinkTo @route="info" @model={{this.model}} @elementId="superstar" />"#,
        &[Expected::new(
            "Passing the \"@elementId\" argument to <LinkTo /> is deprecated.\nInstead, please pass the attribute directly, i.e. \"<LinkTo id={{...}} />\" instead of \"<LinkTo @elementId={{...}} />\".",
            "@elementId",
            44,
        )
        .fixable()],
        Some(r#"<LinkTo @route="info" @model={{this.model}} id="superstar" />"#),
    );
}

#[test]
fn deprecated_link_to_event() {
    assert_bad(
        RULE,
        r#"<LinkTo @route="info" @model={{this.model}} @doubleClick={{action this.click}} />"#,
        &[Expected::new(
            "Passing the \"@doubleClick\" argument to <LinkTo /> is deprecated.\nInstead, please use the {{on}} modifier, i.e. \"<LinkTo {{on \"dblclick\" ...}} />\" instead of \"<LinkTo @doubleClick={{...}} />\".",
            "@doubleClick",
            44,
        )
        .fixable()],
        Some(r#"<LinkTo @route="info" @model={{this.model}} {{on "dblclick" (action this.click)}} />"#),
    );
}

#[test]
fn deprecated_input_arguments() {
    assert_bad(
        RULE,
        r#"<Input @value="1" @bubbles={{false}} />"#,
        &[Expected::new(
            "Passing the \"@bubbles\" argument to <Input /> is deprecated.",
            "@bubbles",
            18,
        )],
        None,
    );
    assert_bad(
        RULE,
        r#"<Input @value="1" @elementId="42" @disabled="disabled" />"#,
        &[
            Expected::new(
                deprecation_message("Input", "elementId", Some(DeprecationFix::Attribute("id"))),
                "@elementId",
                18,
            )
            .fixable(),
            Expected::new(
                deprecation_message(
                    "Input",
                    "disabled",
                    Some(DeprecationFix::Attribute("disabled")),
                ),
                "@disabled",
                34,
            )
            .fixable(),
        ],
        Some(r#"<Input @value="1" id="42" disabled="disabled" />"#),
    );
}

#[test]
fn deprecated_input_event() {
    assert_bad(
        RULE,
        r#"<Input @value="1" @key-up={{ths.onKeyUp}} />"#,
        &[Expected::new(
            "Passing the \"@key-up\" argument to <Input /> is deprecated.\nInstead, please use the {{on}} modifier, i.e. \"<Input {{on \"keyup\" ...}} />\" instead of \"<Input @key-up={{...}} />\".",
            "@key-up",
            18,
        )
        .fixable()],
        Some(r#"<Input @value="1" {{on "keyup" ths.onKeyUp}} />"#),
    );
}

#[test]
fn deprecated_textarea_arguments_and_events() {
    assert_bad(
        RULE,
        r#"<Textarea @value="1" @bubbles={{false}} />"#,
        &[Expected::new(
            "Passing the \"@bubbles\" argument to <Textarea /> is deprecated.",
            "@bubbles",
            21,
        )],
        None,
    );
    assert_bad(
        RULE,
        r#"<Textarea @value="1" @elementId="42" />"#,
        &[Expected::new(
            "Passing the \"@elementId\" argument to <Textarea /> is deprecated.\nInstead, please pass the attribute directly, i.e. \"<Textarea id={{...}} />\" instead of \"<Textarea @elementId={{...}} />\".",
            "@elementId",
            21,
        )
        .fixable()],
        Some(r#"<Textarea @value="1" id="42" />"#),
    );
    assert_bad(
        RULE,
        r#"<Textarea @value="1" @key-up={{ths.onKeyUp}} />"#,
        &[Expected::new(
            "Passing the \"@key-up\" argument to <Textarea /> is deprecated.\nInstead, please use the {{on}} modifier, i.e. \"<Textarea {{on \"keyup\" ...}} />\" instead of \"<Textarea @key-up={{...}} />\".",
            "@key-up",
            21,
        )
        .fixable()],
        Some(r#"<Textarea @value="1" {{on "keyup" ths.onKeyUp}} />"#),
    );
}

#[test]
fn event_without_value_is_reported_but_not_fixed() {
    assert_bad(
        RULE,
        r#"<Input @value="1" @click />"#,
        &[Expected::new(
            deprecation_message("Input", "click", Some(DeprecationFix::Event("click"))),
            "@click",
            18,
        )],
        None,
    );
}

#[test]
fn components_nested_in_blocks_are_checked() {
    assert_bad(
        RULE,
        "{{#if this.show}}\n  <LinkTo @route=\"a\" @rout=\"b\" />\n{{/if}}",
        &[Expected {
            line: 2,
            ..Expected::new(
                unknown_argument_message("LinkTo", "rout", Some("route")),
                "@rout",
                21,
            )
        }],
        None,
    );
}

#[test]
fn unquoted_event_value_stays_a_string() {
    assert_bad(
        RULE,
        "<Input @click=go />",
        &[Expected::new(
            deprecation_message("Input", "click", Some(DeprecationFix::Event("click"))),
            "@click",
            7,
        )
        .fixable()],
        Some(r#"<Input {{on "click" "go"}} />"#),
    );
}

#[test]
fn attribute_migration_skipped_when_attribute_exists() {
    assert_bad(
        RULE,
        "<Input @disabled={{x}} disabled />",
        &[Expected::new(
            deprecation_message(
                "Input",
                "disabled",
                Some(DeprecationFix::Attribute("disabled")),
            ),
            "@disabled",
            7,
        )],
        None,
    );
    assert_bad(
        RULE,
        r#"<Textarea @elementId="a" id="b" />"#,
        &[Expected::new(
            deprecation_message("Textarea", "elementId", Some(DeprecationFix::Attribute("id"))),
            "@elementId",
            10,
        )],
        None,
    );
}
