//! Metrics error types

use thiserror::Error;

/// Result type for counter operations
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors returned by counter backends
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    /// Increment for a scope that was never initialized
    #[error("unknown counter scope '{scope}'")]
    UnknownScope { scope: String },

    /// Increment for a counter the scope did not declare
    #[error("scope '{scope}' has no counter '{counter}'")]
    UnknownCounter { scope: String, counter: String },

    /// Backend has been stopped
    #[error("counter backend is stopped")]
    Stopped,
}

impl MetricsError {
    /// Create an UnknownScope error
    pub fn unknown_scope(scope: impl Into<String>) -> Self {
        Self::UnknownScope { scope: scope.into() }
    }

    /// Create an UnknownCounter error
    pub fn unknown_counter(scope: impl Into<String>, counter: impl Into<String>) -> Self {
        Self::UnknownCounter {
            scope: scope.into(),
            counter: counter.into(),
        }
    }
}
