//! Tests for the null output

use super::{NullOutput, UNMATCHED_TAG_LIMIT};
use crate::Output;
use ripple_protocol::{EventBatch, EventTime, Record};

fn batch(n: usize) -> EventBatch {
    (0..n).map(|i| (EventTime::new(i as i64, 0), Record::new())).collect()
}

#[test]
fn test_discards_and_counts() {
    let null = NullOutput::new();

    null.emit_events("a", &batch(3)).unwrap();
    null.emit_events("b", &batch(2)).unwrap();

    let snapshot = null.metrics().snapshot();
    assert_eq!(snapshot.batches_received, 2);
    assert_eq!(snapshot.records_written, 5);
    assert_eq!(snapshot.write_errors, 0);
}

#[test]
fn test_empty_batch() {
    let null = NullOutput::new();
    null.emit_events("a", &EventBatch::multi()).unwrap();
    assert_eq!(null.metrics().snapshot().records_written, 0);
}

#[test]
fn test_plugin_id() {
    assert_eq!(NullOutput::new().plugin_id(), None);
    let null = NullOutput::new().with_plugin_id("discard");
    assert_eq!(null.plugin_id(), Some("discard"));
    assert_eq!(null.name(), "null");
}

// ============================================================================
// Unmatched tag reporting
// ============================================================================

#[test]
fn test_silent_output_never_reports() {
    let null = NullOutput::new();
    null.emit_events("x.y", &batch(1)).unwrap();
    assert_eq!(null.unmatched_tags(), 0);
    assert!(null.is_suppressed());
}

#[test]
fn test_unmatched_reports_each_tag_once() {
    let null = NullOutput::unmatched();
    assert!(!null.is_suppressed());

    null.emit_events("x.y", &batch(1)).unwrap();
    null.emit_events("x.y", &batch(1)).unwrap();
    null.emit_events("x.z", &batch(1)).unwrap();

    assert_eq!(null.unmatched_tags(), 2);
}

#[test]
fn test_suppress_missing_match() {
    let null = NullOutput::unmatched();
    null.emit_events("before", &batch(1)).unwrap();

    null.suppress_missing_match();
    assert!(null.is_suppressed());

    null.emit_events("after", &batch(1)).unwrap();
    assert_eq!(null.unmatched_tags(), 1);
    assert_eq!(null.metrics().snapshot().records_written, 2);
}

#[test]
fn test_unmatched_tags_stay_bounded() {
    let null = NullOutput::unmatched();
    for i in 0..UNMATCHED_TAG_LIMIT * 4 {
        null.emit_events(&format!("tag.{i}"), &batch(1)).unwrap();
    }
    assert_eq!(null.unmatched_tags(), UNMATCHED_TAG_LIMIT);
}

#[test]
fn test_forgotten_tag_is_remembered_again() {
    let null = NullOutput::unmatched();
    null.emit_events("first", &batch(1)).unwrap();
    for i in 0..UNMATCHED_TAG_LIMIT {
        null.emit_events(&format!("tag.{i}"), &batch(1)).unwrap();
    }

    // "first" was evicted; seeing it again evicts "tag.0" and stays bounded
    null.emit_events("first", &batch(1)).unwrap();
    assert_eq!(null.unmatched_tags(), UNMATCHED_TAG_LIMIT);
}

#[test]
fn test_counts_wire_size() {
    let null = NullOutput::new();
    let three = batch(3);
    null.emit_events("a", &three).unwrap();
    null.emit_events("a", &EventBatch::multi()).unwrap();

    let wire = three.encoded_size().unwrap() + EventBatch::multi().encoded_size().unwrap();
    assert_eq!(null.metrics().snapshot().emit_size, wire);
}
