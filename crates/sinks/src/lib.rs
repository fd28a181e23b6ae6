//! Ripple - Outputs
//!
//! Outputs terminate routes. The router hands each one a borrowed
//! [`EventBatch`](ripple_protocol::EventBatch) on the emitting thread; an
//! output that fails returns a [`SinkError`] and the router reports it to
//! its error handler.
//!
//! ```text
//! [EventRouter] --&EventBatch--> [Pipeline?] --&EventBatch--> [Output]
//! ```
//!
//! # Available Outputs
//!
//! | Output | Purpose |
//! |--------|---------|
//! | `null` | Discard (and report unmatched tags when used as the default) |
//! | `stdout` | One line per record for debugging |
//! | `copy` | Fan out to several stores |
//! | `memory` | Capture batches (tests, `ripple check`) |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ripple_protocol::{EventBatch, EventTime, Record};
//! use ripple_sinks::{CopyOutput, MemoryOutput, NullOutput, Output};
//!
//! let memory = Arc::new(MemoryOutput::new());
//! let copy = CopyOutput::new(vec![memory.clone(), Arc::new(NullOutput::new())]).unwrap();
//!
//! copy.emit_events("app.log", &EventBatch::one(EventTime::now(), Record::new())).unwrap();
//! assert_eq!(memory.record_count(), 1);
//! ```

// =============================================================================
// Output implementations (each in its own submodule)
// =============================================================================

/// Null output - discards all data
pub mod null;

/// Stdout output - human-readable debug output
pub mod stdout;

/// Copy output - fan-out to several stores
pub mod copy;

/// Memory output - captures batches
pub mod memory;

/// Output trait, errors and counters
mod common;

// =============================================================================
// Public re-exports
// =============================================================================

pub use common::{MetricsSnapshot, Output, Result, SinkError, SinkMetrics};

pub use copy::CopyOutput;
pub use memory::MemoryOutput;
pub use null::{NullOutput, UNMATCHED_TAG_LIMIT};
pub use stdout::{StdoutConfig, StdoutFormat, StdoutOutput};
