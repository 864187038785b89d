//! Curly Rules
//!
//! Built-in lint rules for mustache-style templates, the static registry of
//! built-in component argument schemas, and the [`Linter`] that drives them.

pub mod builtin;
pub mod component_registry;
pub mod engine;

pub use builtin::{
    BuiltinRules, ERROR_MESSAGE_FLIP_IF, ERROR_MESSAGE_TRIPLE_CURLIES, ERROR_MESSAGE_USE_IF,
    ERROR_MESSAGE_USE_UNLESS, NO_NEGATED_CONDITION, NO_TRIPLE_CURLIES,
    NO_UNKNOWN_ARGUMENTS_FOR_BUILTIN_COMPONENTS, NoNegatedCondition, NoTripleCurlies,
    NoUnknownArgumentsForBuiltinComponents, RuleBuilder, RuleDescriptor,
};
pub use component_registry::{
    ComponentSchema, Deprecation, DeprecationFix, component_names, component_schema,
};
pub use engine::{LintOutcome, Linter};
