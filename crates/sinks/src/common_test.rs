//! Tests for output counters and errors

use std::error::Error;

use ripple_protocol::{EventBatch, EventTime, Record};
use serde_json::json;

use crate::{MetricsSnapshot, SinkError, SinkMetrics};

fn batch(n: usize) -> EventBatch {
    (0..n)
        .map(|i| {
            let mut record = Record::new();
            record.insert("n".into(), json!(i));
            (EventTime::new(i as i64, 0), record)
        })
        .collect()
}

#[test]
fn test_fresh_counters_are_zero() {
    assert_eq!(SinkMetrics::default().snapshot(), MetricsSnapshot::default());
}

#[test]
fn test_counters_accumulate() {
    let metrics = SinkMetrics::new();

    let four = batch(4);
    let one = batch(1);

    metrics.batch_received();
    metrics.delivered(&four, 120);
    metrics.batch_received();
    metrics.delivered(&one, 0);
    metrics.batch_received();
    metrics.write_error();

    let wire = four.encoded_size().unwrap() + one.encoded_size().unwrap();
    assert_eq!(
        metrics.snapshot(),
        MetricsSnapshot {
            batches_received: 3,
            records_written: 5,
            emit_size: wire,
            bytes_written: 120,
            write_errors: 1,
        }
    );
}

#[test]
fn test_reset_zeroes_everything() {
    let metrics = SinkMetrics::new();
    metrics.batch_received();
    metrics.delivered(&batch(2), 64);
    metrics.write_error();

    metrics.reset();
    assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_error_messages() {
    assert_eq!(SinkError::write("queue closed").to_string(), "write failed: queue closed");
    assert_eq!(
        SinkError::config("format must be json or text").to_string(),
        "invalid output config: format must be json or text"
    );
}

#[test]
fn test_store_error_chains_to_cause() {
    let err = SinkError::store(1, "memory", SinkError::write("boom"));
    assert_eq!(err.to_string(), "store 1 (memory) failed: write failed: boom");

    let cause = err.source().map(ToString::to_string);
    assert_eq!(cause.as_deref(), Some("write failed: boom"));
}

#[test]
fn test_broken_pipe_becomes_io_error() {
    let err = SinkError::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
    assert!(matches!(err, SinkError::Io(_)));
}
