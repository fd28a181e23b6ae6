//! Error handlers
//!
//! The router never returns delivery errors to emitters. Failed batches and
//! records that a filter could not process are handed to an
//! [`EmitErrorHandler`] instead.

use std::sync::Arc;

use ripple_protocol::{EventBatch, EventTime, Record};
use ripple_transform::{ErrorEventSink, TransformError};

use crate::EmitError;
use crate::metrics::RouterStats;

/// Receives batches that failed delivery and records that failed filtering
///
/// Implementations must not fail or panic; they are called on the emitting
/// thread.
pub trait EmitErrorHandler: ErrorEventSink {
    /// Report a batch whose route failed
    fn handle_emits_error(&self, tag: &str, batch: &EventBatch, error: &EmitError);
}

/// Handler that logs every failure at `warn`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorHandler;

impl LogErrorHandler {
    /// Create a new logging handler
    pub const fn new() -> Self {
        Self
    }
}

impl ErrorEventSink for LogErrorHandler {
    fn emit_error_event(&self, tag: &str, time: EventTime, record: &Record, error: &TransformError) {
        tracing::warn!(
            tag,
            time = %time,
            fields = record.len(),
            error = %error,
            "dropped record after filter error"
        );
    }
}

impl EmitErrorHandler for LogErrorHandler {
    fn handle_emits_error(&self, tag: &str, batch: &EventBatch, error: &EmitError) {
        tracing::warn!(
            tag,
            records = batch.len(),
            error = %error,
            "emit failed, batch dropped"
        );
    }
}

/// Counts error events on their way to the router's handler
///
/// Pipelines report filter errors here so router statistics see them.
pub(crate) struct ErrorForwarder {
    handler: Arc<dyn EmitErrorHandler>,
    stats: Arc<RouterStats>,
}

impl ErrorForwarder {
    pub(crate) fn new(handler: Arc<dyn EmitErrorHandler>, stats: Arc<RouterStats>) -> Self {
        Self { handler, stats }
    }

    pub(crate) fn handle_emits_error(&self, tag: &str, batch: &EventBatch, error: &EmitError) {
        self.stats.record_emit_error();
        self.handler.handle_emits_error(tag, batch, error);
    }
}

impl ErrorEventSink for ErrorForwarder {
    fn emit_error_event(&self, tag: &str, time: EventTime, record: &Record, error: &TransformError) {
        self.stats.record_error_event();
        self.handler.emit_error_event(tag, time, record, error);
    }
}
