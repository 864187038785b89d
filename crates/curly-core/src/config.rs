//! Linter configuration
//!
//! The configuration maps rule ids to raw JSON values. Each rule validates its
//! own value when the linter is built, so this layer only deals with reading
//! the document.

use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::{CurlyError, Result};

/// Rule configuration for one lint run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LinterConfiguration {
    /// JSON Schema reference for IDE support
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    #[schemars(skip)]
    pub schema: Option<String>,

    /// Rule id to rule configuration
    #[serde(default)]
    #[schemars(description = "Rule configuration keyed by rule id; `true` enables a rule")]
    pub rules: BTreeMap<String, Value>,
}

impl LinterConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse strict JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| CurlyError::config_parse_error(format!("Invalid configuration: {e}")))
    }

    /// Parse JSON with comments and trailing commas
    pub fn from_jsonc_str(content: &str) -> Result<Self> {
        json5::from_str(content)
            .map_err(|e| CurlyError::config_parse_error(format!("Invalid configuration: {e}")))
    }

    /// Read a JSON/JSONC configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CurlyError::io_error(path, e))?;
        let config = Self::from_jsonc_str(&content).map_err(|e| {
            CurlyError::config_parse_error(format!("{} ({})", e, path.display()))
        })?;

        tracing::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Raw value configured for a rule
    pub fn rule(&self, rule_id: &str) -> Option<&Value> {
        self.rules.get(rule_id)
    }

    pub fn with_rule(mut self, rule_id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.rules.insert(rule_id.into(), value.into());
        self
    }

    /// JSON Schema of the configuration document
    pub fn json_schema() -> Schema {
        schema_for!(LinterConfiguration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_from_json_str() {
        let config = LinterConfiguration::from_json_str(
            r#"{ "rules": { "no-negated-condition": true } }"#,
        )
        .unwrap();
        assert_eq!(config.rule("no-negated-condition"), Some(&json!(true)));
        assert_eq!(config.rule("missing"), None);
    }

    #[test]
    fn test_from_jsonc_str_accepts_comments() {
        let config = LinterConfiguration::from_jsonc_str(
            r#"{
                // enabled for the whole project
                "rules": {
                    "no-negated-condition": true,
                    "no-unknown-arguments-for-builtin-components": false,
                },
            }"#,
        )
        .unwrap();
        assert_eq!(config.rules.len(), 2);
        assert_eq!(
            config.rule("no-unknown-arguments-for-builtin-components"),
            Some(&json!(false))
        );
    }

    #[test]
    fn test_invalid_document() {
        let err = LinterConfiguration::from_json_str(r#"{ "rules": [] }"#).unwrap_err();
        assert!(matches!(err, CurlyError::ConfigParse { .. }));

        let err = LinterConfiguration::from_json_str(r#"{ "rulez": {} }"#).unwrap_err();
        assert!(err.to_string().contains("rulez"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".curlyrc.json");
        std::fs::write(&path, "{ \"rules\": { \"no-negated-condition\": true, } }").unwrap();

        let config = LinterConfiguration::load(&path).unwrap();
        assert_eq!(
            config,
            LinterConfiguration::new().with_rule("no-negated-condition", true)
        );
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = LinterConfiguration::load(&temp_dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CurlyError::Io { .. }));
    }

    #[test]
    fn test_json_schema_lists_rules() {
        let schema = serde_json::to_value(LinterConfiguration::json_schema()).unwrap();
        assert!(schema["properties"]["rules"].is_object());
    }
}
