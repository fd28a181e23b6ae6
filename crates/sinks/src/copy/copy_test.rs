//! Tests for the copy output

use std::sync::Arc;

use ripple_protocol::{EventBatch, EventTime, Record};

use super::CopyOutput;
use crate::{MemoryOutput, NullOutput, Output, SinkError};

fn batch(n: usize) -> EventBatch {
    (0..n).map(|i| (EventTime::new(i as i64, 0), Record::new())).collect()
}

#[test]
fn test_requires_store() {
    assert!(matches!(CopyOutput::new(Vec::new()), Err(SinkError::Config(_))));
}

#[test]
fn test_every_store_receives_batch() {
    let a = Arc::new(MemoryOutput::new());
    let b = Arc::new(MemoryOutput::new());
    let copy = CopyOutput::new(vec![a.clone(), b.clone()]).unwrap();

    copy.emit_events("fan.out", &batch(3)).unwrap();

    assert_eq!(a.record_count(), 3);
    assert_eq!(b.record_count(), 3);
    assert_eq!(a.batches()[0].0, "fan.out");
    assert_eq!(copy.metrics().snapshot().records_written, 3);
}

#[test]
fn test_deep_copy_delivers_equal_batches() {
    let a = Arc::new(MemoryOutput::new());
    let b = Arc::new(MemoryOutput::new());
    let copy = CopyOutput::new(vec![a.clone(), b.clone()])
        .unwrap()
        .with_deep_copy(true);

    let input = batch(2);
    copy.emit_events("t", &input).unwrap();

    assert_eq!(a.batches()[0].1, input);
    assert_eq!(b.batches()[0].1, input);
}

#[test]
fn test_first_failure_stops_fan_out() {
    let first = Arc::new(MemoryOutput::new());
    let failing = Arc::new(MemoryOutput::new());
    let last = Arc::new(MemoryOutput::new());
    failing.fail_with(Some("boom"));

    let copy = CopyOutput::new(vec![first.clone(), failing.clone(), last.clone()]).unwrap();
    let err = copy.emit_events("t", &batch(1)).unwrap_err();

    match err {
        SinkError::Store { index, store, .. } => {
            assert_eq!(index, 1);
            assert_eq!(store, "memory");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(first.record_count(), 1);
    assert_eq!(last.record_count(), 0);
    assert_eq!(copy.metrics().snapshot().write_errors, 1);
}

#[test]
fn test_mixed_stores() {
    let null = Arc::new(NullOutput::new());
    let memory = Arc::new(MemoryOutput::new());
    let copy = CopyOutput::new(vec![null.clone(), memory.clone()])
        .unwrap()
        .with_plugin_id("fan");

    copy.emit_events("t", &batch(4)).unwrap();

    assert_eq!(null.metrics().snapshot().records_written, 4);
    assert_eq!(memory.record_count(), 4);
    assert_eq!(copy.plugin_id(), Some("fan"));
    assert_eq!(copy.stores().len(), 2);
}

#[test]
fn test_emit_size_matches_wire_size() {
    let null = Arc::new(NullOutput::new());
    let copy = CopyOutput::new(vec![null.clone()]).unwrap();
    let one = batch(1);

    copy.emit_events("t", &one).unwrap();

    let wire = one.encoded_size().unwrap();
    assert!(wire > 0);
    assert_eq!(copy.metrics().snapshot().emit_size, wire);
    assert_eq!(null.metrics().snapshot().emit_size, wire);
    assert_eq!(null.metrics().snapshot().bytes_written, 0);
}
