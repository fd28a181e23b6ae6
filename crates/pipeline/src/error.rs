//! Pipeline error types
//!
//! Errors raised while delivering a batch along a route. They never escape
//! the router: `EventRouter` hands them to its `EmitErrorHandler`.

use ripple_sinks::SinkError;
use ripple_transform::TransformError;
use thiserror::Error;

/// Why a routed batch was not delivered
#[derive(Debug, Error)]
pub enum EmitError {
    /// A bulk filter transform failed
    #[error("filter failed: {0}")]
    Filter(#[from] TransformError),

    /// The terminal output rejected the batch
    #[error("output failed: {0}")]
    Output(#[from] SinkError),

    /// Pipeline was shared before an output was attached
    #[error("pipeline has no output")]
    NoOutput,
}

impl EmitError {
    /// True when a filter, not the output, failed
    #[inline]
    pub fn is_filter(&self) -> bool {
        matches!(self, Self::Filter(_))
    }
}

/// Result type for emit operations
pub type Result<T> = std::result::Result<T, EmitError>;
