//! Common types shared by all outputs
//!
//! The [`Output`] trait, the error type and the per-output counters.

use std::sync::atomic::{AtomicU64, Ordering};

use ripple_protocol::EventBatch;
use thiserror::Error;

/// A collector that terminates a route
///
/// Outputs are shared between every route that ends in them and are called
/// from whichever thread emitted the batch, so implementations synchronize
/// internally.
pub trait Output: Send + Sync {
    /// Output type name (`null`, `stdout`, ...)
    fn name(&self) -> &'static str;

    /// Configured plugin id, used as the metrics scope
    fn plugin_id(&self) -> Option<&str> {
        None
    }

    /// Write a batch routed for `tag`
    fn emit_events(&self, tag: &str, batch: &EventBatch) -> Result<()>;

    /// Stop reporting unmatched tags
    ///
    /// Only called on the router's default output, once startup is over.
    fn suppress_missing_match(&self) {}
}

impl std::fmt::Debug for dyn Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Output")
            .field("name", &self.name())
            .field("plugin_id", &self.plugin_id())
            .finish()
    }
}

/// Per-output delivery counters
///
/// Kept apart from the router's route counters: these count what the output
/// itself saw, including batches it failed to write. `emit_size` is the
/// wire-encoded size of delivered batches, the same measure the router uses
/// for its route sizes; `bytes_written` is what the output itself wrote.
#[derive(Debug, Default)]
pub struct SinkMetrics {
    batches: AtomicU64,
    records: AtomicU64,
    emit_size: AtomicU64,
    bytes: AtomicU64,
    errors: AtomicU64,
}

impl SinkMetrics {
    pub const fn new() -> Self {
        Self {
            batches: AtomicU64::new(0),
            records: AtomicU64::new(0),
            emit_size: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }

    /// Count a batch on arrival, before any write is attempted
    #[inline]
    pub fn batch_received(&self) {
        self.batches.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a delivered batch
    ///
    /// `bytes` is zero for outputs that do not serialize.
    pub fn delivered(&self, batch: &EventBatch, bytes: u64) {
        self.records.fetch_add(batch.len() as u64, Ordering::Relaxed);
        match batch.encoded_size() {
            Ok(size) => {
                self.emit_size.fetch_add(size, Ordering::Relaxed);
            }
            Err(e) => tracing::warn!(error = %e, "failed to size delivered batch"),
        }
        if bytes > 0 {
            self.bytes.fetch_add(bytes, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn write_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let read = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        MetricsSnapshot {
            batches_received: read(&self.batches),
            records_written: read(&self.records),
            emit_size: read(&self.emit_size),
            bytes_written: read(&self.bytes),
            write_errors: read(&self.errors),
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in [&self.batches, &self.records, &self.emit_size, &self.bytes, &self.errors] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Copy of [`SinkMetrics`] at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub batches_received: u64,
    pub records_written: u64,
    pub emit_size: u64,
    pub bytes_written: u64,
    pub write_errors: u64,
}

/// Output errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// The output refused or lost the batch
    #[error("write failed: {0}")]
    Write(String),

    /// Invalid output declaration
    #[error("invalid output config: {0}")]
    Config(String),

    #[error("output I/O: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be rendered as JSON
    #[error("record encoding failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A store behind a copy output failed
    #[error("store {index} ({store}) failed: {source}")]
    Store {
        /// Position of the store in the copy list
        index: usize,
        /// Type name of the failing store
        store: &'static str,
        /// Underlying failure
        #[source]
        source: Box<SinkError>,
    },
}

impl SinkError {
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap the failure of one store of a copy output
    pub fn store(index: usize, store: &'static str, source: SinkError) -> Self {
        Self::Store {
            index,
            store,
            source: Box::new(source),
        }
    }
}

/// Result type for output operations
pub type Result<T> = std::result::Result<T, SinkError>;

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
