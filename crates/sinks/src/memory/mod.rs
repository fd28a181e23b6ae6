//! Memory Output - Captures batches in memory
//!
//! Keeps every batch it receives, in arrival order, together with its tag.
//! Used by tests and by `ripple check` to show what a route would write.
//! A failure can be armed to exercise error paths.

use parking_lot::Mutex;
use ripple_protocol::{EventBatch, EventTime, Record};

use crate::{Output, Result, SinkError, SinkMetrics};


/// Output that stores received batches
#[derive(Debug, Default)]
pub struct MemoryOutput {
    plugin_id: Option<String>,
    batches: Mutex<Vec<(String, EventBatch)>>,
    fail_with: Mutex<Option<String>>,
    metrics: SinkMetrics,
}

impl MemoryOutput {
    /// Create an empty memory output
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the plugin id
    pub fn with_plugin_id(mut self, id: impl Into<String>) -> Self {
        self.plugin_id = Some(id.into());
        self
    }

    /// Make every following write fail with `message`; `None` disarms
    pub fn fail_with(&self, message: Option<&str>) {
        *self.fail_with.lock() = message.map(str::to_string);
    }

    /// Captured `(tag, batch)` pairs
    pub fn batches(&self) -> Vec<(String, EventBatch)> {
        self.batches.lock().clone()
    }

    /// Captured records flattened across batches
    pub fn records(&self) -> Vec<(String, EventTime, Record)> {
        self.batches
            .lock()
            .iter()
            .flat_map(|(tag, batch)| {
                batch
                    .iter()
                    .map(move |(time, record)| (tag.clone(), time, record.clone()))
            })
            .collect()
    }

    /// Total captured records
    pub fn record_count(&self) -> usize {
        self.batches.lock().iter().map(|(_, b)| b.len()).sum()
    }

    /// Drop everything captured so far
    pub fn clear(&self) {
        self.batches.lock().clear();
    }

    /// Get reference to metrics
    #[inline]
    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }
}

impl Output for MemoryOutput {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn plugin_id(&self) -> Option<&str> {
        self.plugin_id.as_deref()
    }

    fn emit_events(&self, tag: &str, batch: &EventBatch) -> Result<()> {
        self.metrics.batch_received();

        if let Some(message) = self.fail_with.lock().as_deref() {
            self.metrics.write_error();
            return Err(SinkError::write(message));
        }

        self.batches.lock().push((tag.to_string(), batch.clone()));
        self.metrics.delivered(batch, 0);
        Ok(())
    }
}
