//! Null output - discards all data
//!
//! Counts what it receives and drops it. Used as the router's built-in
//! default output, in which case it also reports tags no rule matched.
//!
//! # Unmatched Tags
//!
//! Built with [`NullOutput::unmatched`], the output logs one
//! `no patterns matched` warning per distinct tag until
//! [`Output::suppress_missing_match`] is called. After that it discards
//! silently. At most [`UNMATCHED_TAG_LIMIT`] tags are remembered; the oldest
//! is forgotten first and may warn again.
//!
//! # Example
//!
//! ```
//! use ripple_protocol::{EventBatch, EventTime, Record};
//! use ripple_sinks::{NullOutput, Output};
//!
//! let null = NullOutput::new();
//! null.emit_events("app.log", &EventBatch::one(EventTime::now(), Record::new())).unwrap();
//! assert_eq!(null.metrics().snapshot().records_written, 1);
//! ```

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use ripple_protocol::EventBatch;

use crate::{Output, Result, SinkMetrics};

/// Distinct unmatched tags remembered for warning deduplication
pub const UNMATCHED_TAG_LIMIT: usize = 1024;

/// Output that discards all received batches
#[derive(Debug, Default)]
pub struct NullOutput {
    plugin_id: Option<String>,
    metrics: SinkMetrics,
    /// Present when unmatched tags are reported
    unmatched: Option<UnmatchedTags>,
}

#[derive(Debug, Default)]
struct UnmatchedTags {
    suppressed: AtomicBool,
    warned: Mutex<WarnedTags>,
}

/// FIFO-bounded set of tags already warned about
#[derive(Debug, Default)]
struct WarnedTags {
    seen: HashSet<String>,
    order: VecDeque<String>,
}

impl WarnedTags {
    /// False when `tag` is already remembered
    fn insert(&mut self, tag: &str) -> bool {
        if self.seen.contains(tag) {
            return false;
        }
        if self.order.len() >= UNMATCHED_TAG_LIMIT {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        self.seen.insert(tag.to_string());
        self.order.push_back(tag.to_string());
        true
    }
}

impl UnmatchedTags {
    fn report(&self, tag: &str) {
        if self.suppressed.load(Ordering::Relaxed) {
            return;
        }
        if self.warned.lock().insert(tag) {
            tracing::warn!(tag = %tag, "no patterns matched");
        }
    }
}

impl NullOutput {
    /// Create a silent null output
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a null output that warns about unmatched tags
    pub fn unmatched() -> Self {
        Self {
            unmatched: Some(UnmatchedTags::default()),
            ..Self::default()
        }
    }

    /// Set the plugin id
    pub fn with_plugin_id(mut self, id: impl Into<String>) -> Self {
        self.plugin_id = Some(id.into());
        self
    }

    /// Get reference to metrics
    #[inline]
    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    /// Whether unmatched-tag warnings are currently suppressed
    ///
    /// Always true for a silent null output.
    pub fn is_suppressed(&self) -> bool {
        self.unmatched
            .as_ref()
            .is_none_or(|u| u.suppressed.load(Ordering::Relaxed))
    }

    /// Number of unmatched tags currently remembered
    pub fn unmatched_tags(&self) -> usize {
        self.unmatched.as_ref().map_or(0, |u| u.warned.lock().order.len())
    }
}

impl Output for NullOutput {
    fn name(&self) -> &'static str {
        "null"
    }

    fn plugin_id(&self) -> Option<&str> {
        self.plugin_id.as_deref()
    }

    fn emit_events(&self, tag: &str, batch: &EventBatch) -> Result<()> {
        self.metrics.batch_received();
        self.metrics.delivered(batch, 0);

        if let Some(unmatched) = &self.unmatched {
            unmatched.report(tag);
        }
        Ok(())
    }

    fn suppress_missing_match(&self) {
        if let Some(unmatched) = &self.unmatched {
            unmatched.suppressed.store(true, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
#[path = "null_test.rs"]
mod null_test;
