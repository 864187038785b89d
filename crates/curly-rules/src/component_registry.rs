//! Built-in component registry
//!
//! Argument schemas for the interactive components that ship with the
//! framework. The registry is built once on first use and never mutated.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// How a deprecated argument migrates to current syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeprecationFix {
    /// Pass the value as a plain HTML attribute with this name
    Attribute(&'static str),
    /// Bind the value with `{{on "<event>" ...}}`
    Event(&'static str),
}

/// A deprecated argument and its migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    pub message: String,
    pub fix: Option<DeprecationFix>,
}

/// Arguments accepted by one built-in component
#[derive(Debug, Clone)]
pub struct ComponentSchema {
    pub name: &'static str,
    /// Supported arguments, in suggestion priority order
    pub known_arguments: Vec<&'static str>,
    /// Each group must have at least one member present
    pub required_one_of: Vec<Vec<&'static str>>,
    /// At most one member of each group may be present
    pub conflict_groups: Vec<Vec<&'static str>>,
    pub deprecated_arguments: HashMap<&'static str, Deprecation>,
    pub deprecated_events: HashMap<&'static str, Deprecation>,
}

impl ComponentSchema {
    pub fn is_known(&self, argument: &str) -> bool {
        self.known_arguments.contains(&argument)
    }

    /// Deprecation entry for an argument or event name
    pub fn deprecation(&self, argument: &str) -> Option<&Deprecation> {
        self.deprecated_arguments
            .get(argument)
            .or_else(|| self.deprecated_events.get(argument))
    }
}

/// Message for a deprecated argument of `component`
pub fn deprecation_message(
    component: &str,
    argument: &str,
    fix: Option<DeprecationFix>,
) -> String {
    let mut message = format!("Passing the \"@{argument}\" argument to <{component} /> is deprecated.");
    match fix {
        Some(DeprecationFix::Attribute(attribute)) => message.push_str(&format!(
            "\nInstead, please pass the attribute directly, i.e. \"<{component} {attribute}={{{{...}}}} />\" instead of \"<{component} @{argument}={{{{...}}}} />\"."
        )),
        Some(DeprecationFix::Event(event)) => message.push_str(&format!(
            "\nInstead, please use the {{{{on}}}} modifier, i.e. \"<{component} {{{{on \"{event}\" ...}}}} />\" instead of \"<{component} @{argument}={{{{...}}}} />\"."
        )),
        None => {}
    }
    message
}

/// Component event handler names and the native events they map to
const COMPONENT_EVENTS: &[(&str, &str)] = &[
    ("touchStart", "touchstart"),
    ("touchMove", "touchmove"),
    ("touchEnd", "touchend"),
    ("touchCancel", "touchcancel"),
    ("keyDown", "keydown"),
    ("keyUp", "keyup"),
    ("keyPress", "keypress"),
    ("mouseDown", "mousedown"),
    ("mouseUp", "mouseup"),
    ("contextMenu", "contextmenu"),
    ("click", "click"),
    ("doubleClick", "dblclick"),
    ("focusIn", "focusin"),
    ("focusOut", "focusout"),
    ("submit", "submit"),
    ("input", "input"),
    ("change", "change"),
    ("dragStart", "dragstart"),
    ("drag", "drag"),
    ("dragEnter", "dragenter"),
    ("dragLeave", "dragleave"),
    ("dragOver", "dragover"),
    ("drop", "drop"),
    ("dragEnd", "dragend"),
    ("mouseEnter", "mouseenter"),
    ("mouseLeave", "mouseleave"),
    ("mouseMove", "mousemove"),
];

/// Dashed event arguments of the text input components
const TEXT_INPUT_EVENTS: &[(&str, &str)] = &[
    ("key-down", "keydown"),
    ("key-up", "keyup"),
    ("key-press", "keypress"),
    ("focus-in", "focusin"),
    ("focus-out", "focusout"),
];

/// Classic component arguments with no template equivalent
const CLASSIC_COMPONENT_ARGUMENTS: &[&str] = &[
    "tagName",
    "classNames",
    "classNameBindings",
    "attributeBindings",
    "isVisible",
];

/// Arguments that became attributes with a different name
const RENAMED_ATTRIBUTES: &[(&str, &str)] = &[("elementId", "id"), ("ariaRole", "role")];

/// Attribute bindings shared by `<Input>` and `<Textarea>`
const TEXT_SUPPORT_ATTRIBUTES: &[&str] = &[
    "autocapitalize",
    "autocorrect",
    "autofocus",
    "disabled",
    "form",
    "maxlength",
    "minlength",
    "placeholder",
    "readonly",
    "required",
    "selectionDirection",
    "spellcheck",
    "tabindex",
    "title",
];

const INPUT_ATTRIBUTES: &[&str] = &[
    "accept",
    "autocomplete",
    "autosave",
    "dir",
    "formaction",
    "formenctype",
    "formmethod",
    "formnovalidate",
    "formtarget",
    "height",
    "inputmode",
    "lang",
    "list",
    "max",
    "min",
    "multiple",
    "name",
    "pattern",
    "size",
    "step",
    "width",
];

const TEXTAREA_ATTRIBUTES: &[&str] = &[
    "rows",
    "cols",
    "name",
    "selectionEnd",
    "selectionStart",
    "autocomplete",
    "wrap",
    "lang",
    "dir",
];

const LINK_TO_ATTRIBUTES: &[&str] = &["title", "rel", "tabindex", "target"];

struct SchemaBuilder {
    schema: ComponentSchema,
}

impl SchemaBuilder {
    fn new(name: &'static str, known_arguments: &[&'static str]) -> Self {
        Self {
            schema: ComponentSchema {
                name,
                known_arguments: known_arguments.to_vec(),
                required_one_of: Vec::new(),
                conflict_groups: Vec::new(),
                deprecated_arguments: HashMap::new(),
                deprecated_events: HashMap::new(),
            },
        }
    }

    fn required_one_of(mut self, group: &[&'static str]) -> Self {
        self.schema.required_one_of.push(group.to_vec());
        self
    }

    fn conflicts(mut self, group: &[&'static str]) -> Self {
        self.schema.conflict_groups.push(group.to_vec());
        self
    }

    fn deprecated(mut self, arguments: &[&'static str]) -> Self {
        for &argument in arguments {
            self.insert_argument(argument, None);
        }
        self
    }

    fn renamed_attributes(mut self, renames: &[(&'static str, &'static str)]) -> Self {
        for &(argument, attribute) in renames {
            self.insert_argument(argument, Some(DeprecationFix::Attribute(attribute)));
        }
        self
    }

    fn attributes(mut self, attributes: &[&'static str]) -> Self {
        for &attribute in attributes {
            self.insert_argument(attribute, Some(DeprecationFix::Attribute(attribute)));
        }
        self
    }

    fn events(mut self, events: &[(&'static str, &'static str)]) -> Self {
        for &(argument, event) in events {
            let fix = Some(DeprecationFix::Event(event));
            let message = deprecation_message(self.schema.name, argument, fix);
            self.schema
                .deprecated_events
                .insert(argument, Deprecation { message, fix });
        }
        self
    }

    fn insert_argument(&mut self, argument: &'static str, fix: Option<DeprecationFix>) {
        let message = deprecation_message(self.schema.name, argument, fix);
        self.schema
            .deprecated_arguments
            .insert(argument, Deprecation { message, fix });
    }

    fn build(self) -> ComponentSchema {
        self.schema
    }
}

static BUILTIN_COMPONENTS: Lazy<HashMap<&'static str, ComponentSchema>> = Lazy::new(|| {
    let input = SchemaBuilder::new(
        "Input",
        &["type", "value", "checked", "insert-newline", "enter", "escape-press"],
    )
    .deprecated(CLASSIC_COMPONENT_ARGUMENTS)
    .deprecated(&["bubbles"])
    .renamed_attributes(RENAMED_ATTRIBUTES)
    .attributes(TEXT_SUPPORT_ATTRIBUTES)
    .attributes(INPUT_ATTRIBUTES)
    .events(COMPONENT_EVENTS)
    .events(TEXT_INPUT_EVENTS)
    .build();

    let textarea = SchemaBuilder::new(
        "Textarea",
        &["value", "insert-newline", "enter", "escape-press"],
    )
    .deprecated(CLASSIC_COMPONENT_ARGUMENTS)
    .deprecated(&["bubbles"])
    .renamed_attributes(RENAMED_ATTRIBUTES)
    .attributes(TEXT_SUPPORT_ATTRIBUTES)
    .attributes(TEXTAREA_ATTRIBUTES)
    .events(COMPONENT_EVENTS)
    .events(TEXT_INPUT_EVENTS)
    .build();

    let link_to = SchemaBuilder::new(
        "LinkTo",
        &[
            "route",
            "model",
            "models",
            "query",
            "replace",
            "disabled",
            "current-when",
            "activeClass",
            "loadingClass",
            "disabledClass",
        ],
    )
    .required_one_of(&["route", "query"])
    .conflicts(&["model", "models"])
    .deprecated(CLASSIC_COMPONENT_ARGUMENTS)
    .deprecated(&["eventName"])
    .renamed_attributes(RENAMED_ATTRIBUTES)
    .attributes(LINK_TO_ATTRIBUTES)
    .events(COMPONENT_EVENTS)
    .build();

    [input, textarea, link_to]
        .into_iter()
        .map(|schema| (schema.name, schema))
        .collect()
});

/// Schema of a built-in component, by tag name
pub fn component_schema(name: &str) -> Option<&'static ComponentSchema> {
    BUILTIN_COMPONENTS.get(name)
}

/// Names of all registered components, sorted
pub fn component_names() -> Vec<&'static str> {
    let mut names: Vec<_> = BUILTIN_COMPONENTS.keys().copied().collect();
    names.sort_unstable();
    names
}
