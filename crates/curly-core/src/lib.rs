//! Curly Core
//!
//! Core linting machinery for mustache-style templates.
//! This crate provides the syntax tree and its parser, the diagnostic model,
//! the rule framework, autofix application and configuration loading.

pub mod autofix;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod result;
pub mod rules;
pub mod syntax;

// Re-export commonly used types
pub use autofix::{Fix, FixBuilder, FixOutcome, FixPreview, apply_fixes};
pub use config::LinterConfiguration;
pub use diagnostics::{Diagnostic, Severity};
pub use error::{CurlyError, ErrorKind};
pub use result::Result;
pub use rules::{
    BOOLEAN_SHAPE, ConfigurableRule, LogEntry, Rule, RuleCategory, RuleContext, RuleMetadata,
    ToggleConfig, config_error_message, parse_toggle_config,
};
pub use syntax::{
    HelperCall, NodeKind, NodeRef, SourceText, Span, SyntaxNode, Template, parse, walk,
};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("curly=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
