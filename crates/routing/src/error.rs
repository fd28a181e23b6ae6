//! Routing error types

use thiserror::Error;

/// Result type for routing operations
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Errors that can occur while building routing rules
///
/// These are configuration errors: they surface at setup time and never on
/// the emit path.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Pattern text could not be parsed
    #[error("malformed pattern '{pattern}': {reason}")]
    MalformedPattern {
        /// Offending pattern text
        pattern: String,
        /// What is wrong with it
        reason: String,
    },

    /// Pattern text was empty or whitespace only
    #[error("empty match pattern")]
    EmptyPattern,

    /// Rule references a collector that does not exist
    #[error("unknown collector '{name}' in routing configuration")]
    UnknownCollector {
        /// Name of the missing collector
        name: String,
    },
}

impl RoutingError {
    /// Create a MalformedPattern error
    #[inline]
    pub fn malformed(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownCollector error
    #[inline]
    pub fn unknown_collector(name: impl Into<String>) -> Self {
        Self::UnknownCollector { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_pattern_error() {
        let err = RoutingError::malformed("a..b", "empty segment");
        assert!(err.to_string().contains("a..b"));
        assert!(err.to_string().contains("empty segment"));
    }

    #[test]
    fn test_empty_pattern_error() {
        assert_eq!(RoutingError::EmptyPattern.to_string(), "empty match pattern");
    }

    #[test]
    fn test_unknown_collector_error() {
        let err = RoutingError::unknown_collector("clickhouse");
        assert!(err.to_string().contains("clickhouse"));
        assert!(err.to_string().contains("unknown collector"));
    }
}
