//! Built-in rules
//!
//! Each rule lives in its own module and exports its id, its metadata and its
//! messages. [`BuiltinRules`] is the catalogue the linter resolves configured
//! rule ids against.

pub mod builtin_component_arguments;
pub mod negated_condition;
pub mod no_triple_curlies;

pub use builtin_component_arguments::{
    NO_UNKNOWN_ARGUMENTS_FOR_BUILTIN_COMPONENTS, NoUnknownArgumentsForBuiltinComponents,
};
pub use negated_condition::{
    ERROR_MESSAGE_FLIP_IF, ERROR_MESSAGE_USE_IF, ERROR_MESSAGE_USE_UNLESS, NO_NEGATED_CONDITION,
    NoNegatedCondition,
};
pub use no_triple_curlies::{ERROR_MESSAGE_TRIPLE_CURLIES, NO_TRIPLE_CURLIES, NoTripleCurlies};

use curly_core::{ConfigurableRule, Result, Rule, RuleMetadata};
use serde_json::Value;
use std::fmt;

/// Validates a raw configuration value and builds the rule when it is enabled
pub type RuleBuilder = fn(Option<&Value>) -> Result<Option<Box<dyn Rule>>>;

/// Catalogue entry for one rule
#[derive(Clone, Copy)]
pub struct RuleDescriptor {
    pub metadata: &'static RuleMetadata,
    pub build: RuleBuilder,
}

impl fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("id", &self.metadata.id)
            .finish_non_exhaustive()
    }
}

impl RuleDescriptor {
    pub fn id(&self) -> &'static str {
        self.metadata.id
    }
}

fn build_rule<R: ConfigurableRule + 'static>(raw: Option<&Value>) -> Result<Option<Box<dyn Rule>>> {
    let config = R::parse_config(raw)?;
    Ok(R::from_config(config).map(|rule| Box::new(rule) as Box<dyn Rule>))
}

static BUILTIN_RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        metadata: &negated_condition::METADATA,
        build: build_rule::<NoNegatedCondition>,
    },
    RuleDescriptor {
        metadata: &builtin_component_arguments::METADATA,
        build: build_rule::<NoUnknownArgumentsForBuiltinComponents>,
    },
    RuleDescriptor {
        metadata: &no_triple_curlies::METADATA,
        build: build_rule::<NoTripleCurlies>,
    },
];

/// The built-in rule catalogue
pub struct BuiltinRules;

impl BuiltinRules {
    pub fn all() -> &'static [RuleDescriptor] {
        BUILTIN_RULES
    }

    pub fn get(rule_id: &str) -> Option<&'static RuleDescriptor> {
        BUILTIN_RULES.iter().find(|descriptor| descriptor.id() == rule_id)
    }

    pub fn ids() -> impl Iterator<Item = &'static str> {
        BUILTIN_RULES.iter().map(RuleDescriptor::id)
    }
}
