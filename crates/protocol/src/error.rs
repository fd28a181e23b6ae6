//! Protocol error types
//!
//! Errors that can occur when encoding batches or interpreting event times.

use thiserror::Error;

/// Errors that can occur during protocol operations
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Batch could not be serialized with the wire codec
    #[error("failed to encode batch: {0}")]
    Encode(#[from] bincode::Error),

    /// Value cannot be interpreted as an event time
    #[error("invalid event time: {0}")]
    InvalidTime(String),

    /// Timestamp is outside the representable range
    #[error("event time out of range: {sec}s")]
    TimeOutOfRange { sec: i64 },
}

impl ProtocolError {
    /// Create an invalid time error
    #[inline]
    pub fn invalid_time(msg: impl Into<String>) -> Self {
        Self::InvalidTime(msg.into())
    }

    /// Create an out-of-range error
    #[inline]
    pub fn out_of_range(sec: i64) -> Self {
        Self::TimeOutOfRange { sec }
    }
}
