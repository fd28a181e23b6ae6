//! Transform error types
//!
//! Errors that can occur while building or running filters.

use thiserror::Error;

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Errors that can occur during filtering
#[derive(Debug, Error)]
pub enum TransformError {
    /// Filter logic failed on a record
    #[error("filter '{filter}' failed: {message}")]
    FilterFailed {
        /// Name of the failing filter
        filter: &'static str,
        /// What went wrong
        message: String,
    },

    /// Record is missing a field the filter requires
    #[error("missing field '{0}'")]
    MissingField(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Event time could not be derived from a record
    #[error("invalid event time: {0}")]
    Time(#[from] ripple_protocol::ProtocolError),
}

impl TransformError {
    /// Create a filter failed error
    pub fn failed(filter: &'static str, msg: impl Into<String>) -> Self {
        Self::FilterFailed {
            filter,
            message: msg.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
