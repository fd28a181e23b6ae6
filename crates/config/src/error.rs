//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A rule points at a filter or output that is not declared
    #[error("rule {rule} ('{pattern}') references unknown collector '{collector}'")]
    UnknownCollector {
        /// Index of the rule
        rule: usize,
        /// Pattern text of the rule
        pattern: String,
        /// Name of the missing collector
        collector: String,
    },

    /// An output name that is not declared
    #[error("{referrer} references unknown output '{output}'")]
    UnknownOutput {
        /// What referenced the output
        referrer: String,
        /// Name of the missing output
        output: String,
    },

    /// A name is used by both a filter and an output
    #[error("'{name}' is declared as both a filter and an output")]
    DuplicateName {
        /// The conflicting name
        name: String,
    },

    /// Validation error - required field missing
    #[error("{component} '{name}' is missing required field '{field}'")]
    MissingField {
        /// Component type (e.g., "output", "source")
        component: &'static str,
        /// Name of the component
        name: String,
        /// Missing field name
        field: &'static str,
    },

    /// Validation error - invalid value
    #[error("{component} '{name}' has invalid {field}: {message}")]
    InvalidValue {
        /// Component type
        component: &'static str,
        /// Name of the component
        name: String,
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an UnknownCollector error
    pub fn unknown_collector(rule: usize, pattern: impl Into<String>, collector: impl Into<String>) -> Self {
        Self::UnknownCollector {
            rule,
            pattern: pattern.into(),
            collector: collector.into(),
        }
    }

    /// Create an UnknownOutput error
    pub fn unknown_output(referrer: impl Into<String>, output: impl Into<String>) -> Self {
        Self::UnknownOutput {
            referrer: referrer.into(),
            output: output.into(),
        }
    }

    /// Create a DuplicateName error
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create a MissingField error
    pub fn missing_field(component: &'static str, name: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            component,
            name: name.into(),
            field,
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(
        component: &'static str,
        name: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            component,
            name: name.into(),
            field,
            message: message.into(),
        }
    }
}
