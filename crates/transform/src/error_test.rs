//! Tests for transform error types

use super::*;

#[test]
fn test_error_creation() {
    let err = TransformError::failed("grep", "bad regex input");
    assert!(matches!(err, TransformError::FilterFailed { filter: "grep", .. }));

    let err = TransformError::missing_field("time");
    assert!(matches!(err, TransformError::MissingField(_)));

    let err = TransformError::config("missing fields");
    assert!(matches!(err, TransformError::Config(_)));
}

#[test]
fn test_error_display() {
    let err = TransformError::failed("redact", "boom");
    assert_eq!(err.to_string(), "filter 'redact' failed: boom");

    let err = TransformError::missing_field("ts");
    assert_eq!(err.to_string(), "missing field 'ts'");

    let err = TransformError::config("invalid every");
    assert_eq!(err.to_string(), "invalid configuration: invalid every");
}

#[test]
fn test_error_from_protocol() {
    let inner = ripple_protocol::ProtocolError::invalid_time("nope");
    let err: TransformError = inner.into();
    assert!(matches!(err, TransformError::Time(_)));
    assert!(err.to_string().contains("nope"));
}
