//! Common types and utilities for sources

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

/// Source errors
#[derive(Debug, Error)]
pub enum SourceError {
    /// Invalid configuration
    #[error("invalid {source_type} source configuration: {message}")]
    Config {
        /// Source type name
        source_type: &'static str,
        /// What is wrong
        message: String,
    },
}

impl SourceError {
    pub fn config(source_type: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            source_type,
            message: message.into(),
        }
    }
}

/// Emission counters kept by every source
#[derive(Debug, Default)]
pub struct SourceMetrics {
    /// Records handed to the router
    pub records_emitted: AtomicU64,

    /// Emit rounds (one per rate bin)
    pub rounds: AtomicU64,

    /// Wire-encoded bytes of the emitted events
    pub emit_size: AtomicU64,
}

impl SourceMetrics {
    pub const fn new() -> Self {
        Self {
            records_emitted: AtomicU64::new(0),
            rounds: AtomicU64::new(0),
            emit_size: AtomicU64::new(0),
        }
    }

    /// Record one emit round of `records` records totalling `size` wire bytes
    #[inline]
    pub fn round(&self, records: u64, size: u64) {
        self.rounds.fetch_add(1, Ordering::Relaxed);
        self.records_emitted.fetch_add(records, Ordering::Relaxed);
        self.emit_size.fetch_add(size, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_emitted: self.records_emitted.load(Ordering::Relaxed),
            rounds: self.rounds.load(Ordering::Relaxed),
            emit_size: self.emit_size.load(Ordering::Relaxed),
        }
    }
}

/// Source counters at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub records_emitted: u64,
    pub rounds: u64,
    pub emit_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_rounds() {
        let metrics = SourceMetrics::new();

        metrics.round(3, 150);
        metrics.round(0, 0);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.rounds, 2);
        assert_eq!(snapshot.records_emitted, 3);
        assert_eq!(snapshot.emit_size, 150);
    }

    #[test]
    fn test_config_error_display() {
        let err = SourceError::config("dummy", "rate must be > 0");
        assert_eq!(err.to_string(), "invalid dummy source configuration: rate must be > 0");
    }
}
