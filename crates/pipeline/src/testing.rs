//! Shared test fixtures

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use ripple_protocol::{EventBatch, EventTime, Record};
use ripple_sinks::{MemoryOutput, Output};
use ripple_transform::{ErrorEventSink, Filter, FilterRef, TransformError, TransformResult, Verdict};
use serde_json::json;

use crate::{EmitError, EmitErrorHandler};

pub fn rec(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("test record must be an object"),
    }
}

pub fn batch_of(values: Vec<serde_json::Value>) -> EventBatch {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| (EventTime::new(i as i64, 0), rec(v)))
        .collect()
}

pub fn memory(id: Option<&str>) -> Arc<MemoryOutput> {
    Arc::new(match id {
        Some(id) => MemoryOutput::new().with_plugin_id(id),
        None => MemoryOutput::new(),
    })
}

pub fn as_output(output: &Arc<MemoryOutput>) -> Arc<dyn Output> {
    output.clone()
}

pub fn filter_ref(filter: impl Filter + 'static) -> FilterRef {
    FilterRef::new(Arc::new(filter))
}

/// Appends its label to the `trail` array of every record
pub struct Mark {
    pub label: &'static str,
    pub calls: AtomicU64,
}

impl Mark {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            calls: AtomicU64::new(0),
        }
    }
}

impl Filter for Mark {
    fn name(&self) -> &'static str {
        self.label
    }

    fn filter(&self, _tag: &str, _time: EventTime, record: &mut Record) -> TransformResult<Verdict> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let trail = record.entry("trail").or_insert_with(|| json!([]));
        if let Some(items) = trail.as_array_mut() {
            items.push(json!(self.label));
        }
        Ok(Verdict::Keep)
    }
}

/// Drops records with `"drop": true`, fails on records with `"fail": true`
pub struct Gate;

impl Filter for Gate {
    fn name(&self) -> &'static str {
        "gate"
    }

    fn filter(&self, _tag: &str, _time: EventTime, record: &mut Record) -> TransformResult<Verdict> {
        if record.get("fail").and_then(|v| v.as_bool()) == Some(true) {
            return Err(TransformError::failed("gate", "refused record"));
        }
        if record.get("drop").and_then(|v| v.as_bool()) == Some(true) {
            return Ok(Verdict::Drop);
        }
        Ok(Verdict::Keep)
    }
}

/// Bulk filter whose bulk transform always fails
pub struct BrokenBulk;

impl Filter for BrokenBulk {
    fn name(&self) -> &'static str {
        "broken_bulk"
    }

    fn has_filter_stream(&self) -> bool {
        true
    }

    fn filter_stream(
        &self,
        _tag: &str,
        _batch: &EventBatch,
        _errors: &dyn ErrorEventSink,
    ) -> TransformResult<EventBatch> {
        Err(TransformError::failed("broken_bulk", "stream exploded"))
    }
}

/// Error handler that remembers what it was told
#[derive(Default)]
pub struct Recording {
    pub error_events: Mutex<Vec<(String, Record, String)>>,
    pub emit_errors: Mutex<Vec<(String, usize, String)>>,
}

impl ErrorEventSink for Recording {
    fn emit_error_event(&self, tag: &str, _time: EventTime, record: &Record, error: &TransformError) {
        self.error_events
            .lock()
            .push((tag.to_string(), record.clone(), error.to_string()));
    }
}

impl EmitErrorHandler for Recording {
    fn handle_emits_error(&self, tag: &str, batch: &EventBatch, error: &EmitError) {
        self.emit_errors
            .lock()
            .push((tag.to_string(), batch.len(), error.to_string()));
    }
}
