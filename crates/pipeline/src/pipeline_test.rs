//! Pipeline tests

use std::sync::Arc;
use std::sync::atomic::Ordering;

use ripple_sinks::SinkError;
use ripple_transform::{ExecutionMode, SampleFilter};
use serde_json::json;

use super::*;
use crate::testing::{BrokenBulk, Gate, Mark, Recording, as_output, batch_of, filter_ref, memory};

fn pipeline(errors: &Arc<Recording>) -> Pipeline {
    Pipeline::new(errors.clone())
}

#[test]
fn test_emit_without_output() {
    let errors = Arc::new(Recording::default());
    let p = pipeline(&errors);

    let err = p.emit_events("app", &batch_of(vec![json!({})])).unwrap_err();
    assert!(matches!(err, EmitError::NoOutput));
}

#[test]
fn test_filters_run_in_order() {
    let errors = Arc::new(Recording::default());
    let out = memory(None);

    let mut p = pipeline(&errors);
    p.add_filter(filter_ref(Mark::new("first")));
    p.add_filter(filter_ref(Mark::new("second")));
    p.set_output(as_output(&out));

    p.emit_events("app", &batch_of(vec![json!({"n": 1}), json!({"n": 2})])).unwrap();

    let records = out.records();
    assert_eq!(records.len(), 2);
    for (tag, _, record) in &records {
        assert_eq!(tag, "app");
        assert_eq!(record["trail"], json!(["first", "second"]));
    }
    assert_eq!(p.chain().names(), vec!["first", "second"]);
}

#[test]
fn test_dropped_record_skips_later_filters() {
    let errors = Arc::new(Recording::default());
    let out = memory(None);
    let after = Arc::new(Mark::new("after"));

    let mut p = pipeline(&errors);
    p.add_filter(filter_ref(Gate));
    p.add_filter(FilterRef::new(after.clone()));
    p.set_output(as_output(&out));

    let batch = batch_of(vec![json!({"n": 1}), json!({"n": 2, "drop": true}), json!({"n": 3})]);
    p.emit_events("app", &batch).unwrap();

    assert_eq!(after.calls.load(Ordering::Relaxed), 2);
    let kept: Vec<_> = out.records().into_iter().map(|(_, _, r)| r["n"].clone()).collect();
    assert_eq!(kept, vec![json!(1), json!(3)]);
    assert!(errors.error_events.lock().is_empty());
}

#[test]
fn test_record_error_is_isolated() {
    let errors = Arc::new(Recording::default());
    let out = memory(None);

    let mut p = pipeline(&errors);
    p.add_filter(filter_ref(Gate));
    p.add_filter(filter_ref(Mark::new("after")));
    p.set_output(as_output(&out));

    let batch = batch_of(vec![json!({"n": 1}), json!({"n": 2, "fail": true}), json!({"n": 3})]);
    p.emit_events("app.web", &batch).unwrap();

    assert_eq!(out.record_count(), 2);

    let reported = errors.error_events.lock();
    assert_eq!(reported.len(), 1);
    let (tag, record, error) = &reported[0];
    assert_eq!(tag, "app.web");
    assert_eq!(record["n"], json!(2));
    assert!(error.contains("refused record"));
}

#[test]
fn test_all_records_dropped_still_reaches_output() {
    let errors = Arc::new(Recording::default());
    let out = memory(None);

    let mut p = pipeline(&errors);
    p.add_filter(filter_ref(Gate));
    p.set_output(as_output(&out));

    p.emit_events("app", &batch_of(vec![json!({"drop": true})])).unwrap();

    let batches = out.batches();
    assert_eq!(batches.len(), 1);
    assert!(batches[0].1.is_empty());
}

#[test]
fn test_single_bulk_filter_runs_per_record() {
    let errors = Arc::new(Recording::default());
    let out = memory(None);

    let mut p = pipeline(&errors);
    p.add_filter(filter_ref(SampleFilter::new(2).unwrap()));
    p.set_output(as_output(&out));

    p.emit_events("app", &batch_of(vec![json!({"n": 0}), json!({"n": 1}), json!({"n": 2})])).unwrap();

    assert_eq!(p.chain().mode(), ExecutionMode::PerRecord);
    assert_eq!(out.record_count(), 2);
}

#[test]
fn test_bulk_filter_in_chain_runs_staged() {
    let errors = Arc::new(Recording::default());
    let out = memory(None);

    let mut p = pipeline(&errors);
    p.add_filter(filter_ref(Mark::new("mark")));
    p.add_filter(filter_ref(SampleFilter::new(2).unwrap()));
    p.set_output(as_output(&out));

    let batch = batch_of((0..4).map(|n| json!({"n": n})).collect());
    p.emit_events("app", &batch).unwrap();

    assert_eq!(p.chain().mode(), ExecutionMode::Staged);
    let kept: Vec<_> = out.records().into_iter().map(|(_, _, r)| r["n"].clone()).collect();
    assert_eq!(kept, vec![json!(0), json!(2)]);
}

#[test]
fn test_bulk_failure_propagates() {
    let errors = Arc::new(Recording::default());
    let out = memory(None);

    let mut p = pipeline(&errors);
    p.add_filter(filter_ref(Mark::new("mark")));
    p.add_filter(filter_ref(BrokenBulk));
    p.set_output(as_output(&out));

    let err = p.emit_events("app", &batch_of(vec![json!({})])).unwrap_err();
    assert!(err.is_filter());
    assert!(err.to_string().contains("stream exploded"));
    assert_eq!(out.record_count(), 0);
}

#[test]
fn test_output_failure_propagates() {
    let errors = Arc::new(Recording::default());
    let out = memory(None);
    out.fail_with(Some("connection reset"));

    let mut p = pipeline(&errors);
    p.add_filter(filter_ref(Mark::new("mark")));
    p.set_output(as_output(&out));

    let err = p.emit_events("app", &batch_of(vec![json!({})])).unwrap_err();
    assert!(matches!(err, EmitError::Output(SinkError::Write(_))));
    assert!(errors.emit_errors.lock().is_empty());
}

#[test]
fn test_debug_lists_filters() {
    let errors = Arc::new(Recording::default());
    let mut p = pipeline(&errors);
    p.add_filter(filter_ref(Gate));
    p.set_output(as_output(&memory(None)));

    let debug = format!("{p:?}");
    assert!(debug.contains("gate"));
    assert!(debug.contains("memory"));
}
