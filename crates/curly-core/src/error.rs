//! Error types and handling for template linting operations

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for template linting operations
#[derive(Debug, Error)]
pub enum CurlyError {
    /// A rule received a configuration value it does not accept
    #[error("Configuration error in '{rule_id}': {message}")]
    Config { rule_id: String, message: String },

    /// The configuration document itself could not be read
    #[error("Configuration error: {message}")]
    ConfigParse { message: String },

    /// The configuration names a rule that is not part of the catalogue
    #[error("Unknown rule '{rule_id}'")]
    UnknownRule { rule_id: String },

    /// Template syntax errors from the front end
    #[error("Parse error: {message} at line {line}, column {column}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Autofix application errors
    #[error("Autofix error: {message}")]
    Autofix { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Parse,
    Io,
    Autofix,
}

impl CurlyError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CurlyError::Config { .. }
            | CurlyError::ConfigParse { .. }
            | CurlyError::UnknownRule { .. } => ErrorKind::Config,
            CurlyError::Parse { .. } => ErrorKind::Parse,
            CurlyError::Io { .. } => ErrorKind::Io,
            CurlyError::Autofix { .. } => ErrorKind::Autofix,
        }
    }

    /// Create a rule configuration error
    pub fn config_error(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        CurlyError::Config {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// Create a configuration document error
    pub fn config_parse_error(message: impl Into<String>) -> Self {
        CurlyError::ConfigParse {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        CurlyError::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create an I/O error
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CurlyError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an autofix error
    pub fn autofix_error(message: impl Into<String>) -> Self {
        CurlyError::Autofix {
            message: message.into(),
        }
    }

    /// Configuration problems abort rule activation; nothing else is fatal
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CurlyError::config_error("no-negated-condition", "bad").kind(),
            ErrorKind::Config
        );
        assert_eq!(
            CurlyError::UnknownRule {
                rule_id: "nope".to_string()
            }
            .kind(),
            ErrorKind::Config
        );
        assert_eq!(CurlyError::parse_error("x", 1, 0).kind(), ErrorKind::Parse);
        assert_eq!(CurlyError::autofix_error("x").kind(), ErrorKind::Autofix);
    }

    #[test]
    fn test_error_display() {
        let err = CurlyError::parse_error("Unclosed mustache", 3, 7);
        assert_eq!(
            err.to_string(),
            "Parse error: Unclosed mustache at line 3, column 7"
        );
        assert!(!err.is_fatal());
        assert!(CurlyError::config_error("rule", "oops").is_fatal());
    }
}
