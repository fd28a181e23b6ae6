//! Sample Filter - Keep every Nth record
//!
//! Overrides the bulk transform so a whole batch is sampled with one counter
//! update. The per-record transform uses the same counter, so a chain running
//! record by record keeps exactly the same records.
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | `every` | integer | `10` | Keep one record out of this many |

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ripple_protocol::{EventBatch, EventTime, Record};

use crate::registry::{FilterFactory, FilterOptions};
use crate::{ErrorEventSink, Filter, TransformError, TransformResult, Verdict};

/// Default sampling interval
pub const DEFAULT_EVERY: u64 = 10;

/// Keeps the first of every `every` records seen
#[derive(Debug)]
pub struct SampleFilter {
    every: u64,
    seen: AtomicU64,
}

impl SampleFilter {
    /// Create a sampler keeping one record in `every`
    pub fn new(every: u64) -> TransformResult<Self> {
        if every == 0 {
            return Err(TransformError::config("sample: every must be > 0"));
        }
        Ok(Self {
            every,
            seen: AtomicU64::new(0),
        })
    }

    /// Records seen so far
    pub fn seen(&self) -> u64 {
        self.seen.load(Ordering::Relaxed)
    }

    #[inline]
    fn keeps(&self, position: u64) -> bool {
        position % self.every == 0
    }
}

impl Filter for SampleFilter {
    fn name(&self) -> &'static str {
        "sample"
    }

    fn filter(&self, _tag: &str, _time: EventTime, _record: &mut Record) -> TransformResult<Verdict> {
        let position = self.seen.fetch_add(1, Ordering::Relaxed);
        Ok(if self.keeps(position) { Verdict::Keep } else { Verdict::Drop })
    }

    fn has_filter_stream(&self) -> bool {
        true
    }

    fn filter_stream(
        &self,
        _tag: &str,
        batch: &EventBatch,
        _errors: &dyn ErrorEventSink,
    ) -> TransformResult<EventBatch> {
        let start = self.seen.fetch_add(batch.len() as u64, Ordering::Relaxed);
        Ok(batch
            .iter()
            .zip(start..)
            .filter(|(_, position)| self.keeps(*position))
            .map(|((time, record), _)| (time, record.clone()))
            .collect())
    }
}

/// Factory for sample filters
#[derive(Debug, Clone, Copy)]
pub struct SampleFactory;

impl FilterFactory for SampleFactory {
    fn create(&self, options: &FilterOptions) -> TransformResult<Arc<dyn Filter>> {
        let every = match options.get("every") {
            None => DEFAULT_EVERY,
            Some(toml::Value::Integer(n)) if *n > 0 => *n as u64,
            Some(other) => {
                return Err(TransformError::config(format!(
                    "sample: every must be a positive integer, got {other}"
                )));
            }
        };
        Ok(Arc::new(SampleFilter::new(every)?))
    }

    fn name(&self) -> &'static str {
        "sample"
    }

    fn default_options(&self) -> Option<FilterOptions> {
        let mut options = FilterOptions::new();
        options.insert("every".to_string(), toml::Value::Integer(DEFAULT_EVERY as i64));
        Some(options)
    }
}

#[cfg(test)]
#[path = "sample_test.rs"]
mod tests;
