//! Unescaped interpolation detection
//!
//! `{{{value}}}` writes its value into the page without HTML escaping.

use curly_core::{
    ConfigurableRule, LogEntry, NodeKind, NodeRef, Result, Rule, RuleCategory, RuleContext,
    RuleMetadata, Severity, ToggleConfig, parse_toggle_config,
};
use serde_json::Value;
use tracing::debug;

/// Rule ID for triple-curly interpolation
pub const NO_TRIPLE_CURLIES: &str = "no-triple-curlies";

pub const ERROR_MESSAGE_TRIPLE_CURLIES: &str = "Usage of triple curly brackets is unsafe";

pub static METADATA: RuleMetadata = RuleMetadata {
    id: NO_TRIPLE_CURLIES,
    description: "Disallow unescaped `{{{ }}}` interpolation",
    category: RuleCategory::Suspicious,
    default_severity: Severity::Error,
    fixable: false,
    docs_url: None,
};

const VISITOR: &[NodeKind] = &[NodeKind::Mustache];

#[derive(Debug, Clone, Copy, Default)]
pub struct NoTripleCurlies;

impl Rule for NoTripleCurlies {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn visitor(&self) -> &'static [NodeKind] {
        VISITOR
    }

    fn visit(&self, node: NodeRef<'_>, ctx: &mut RuleContext<'_>) {
        let NodeRef::Mustache(mustache) = node else {
            return;
        };
        if !mustache.trusting {
            return;
        }

        debug!(rule = NO_TRIPLE_CURLIES, span = ?mustache.span, "Unescaped mustache");
        ctx.log(LogEntry::new(
            ERROR_MESSAGE_TRIPLE_CURLIES,
            mustache.span.clone(),
            NodeKind::Mustache,
        ));
    }
}

impl ConfigurableRule for NoTripleCurlies {
    type Config = ToggleConfig;

    fn parse_config(raw: Option<&Value>) -> Result<Self::Config> {
        parse_toggle_config(NO_TRIPLE_CURLIES, raw)
    }

    fn from_config(config: Self::Config) -> Option<Self> {
        config.is_enabled().then_some(NoTripleCurlies)
    }
}
