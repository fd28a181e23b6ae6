//! Ripple Transform - Filters applied between routing and output
//!
//! # Overview
//!
//! Filters rewrite or drop records for the tags their rules match. A
//! pipeline owns a [`FilterChain`] of every matching filter, in rule order,
//! and hands the survivors to one output.
//!
//! ```text
//! [EventBatch] → [Filter 1] → [Filter 2] → ... → [EventBatch'] → Output
//! ```
//!
//! # Design Principles
//!
//! - **Synchronous**: Filters never await; they run on the emitting thread
//! - **Thread-safe**: One filter instance serves every pipeline it is in
//! - **Isolated failures**: On the per-record path a failing record is
//!   reported and dropped without affecting its neighbours
//!
//! # Modules
//!
//! - `chain` - Ordered filters and execution mode selection
//! - `registry` - Dynamic filter creation from config
//! - `noop` - Pass-through filter
//! - `grep` - Keep or drop records by field conditions
//! - `redact` - Mask, remove or pseudonymize fields
//! - `time_key` - Take the event time from a record field
//! - `sample` - Keep every Nth record

mod chain;
mod error;
mod filter;
pub mod grep;
pub mod noop;
pub mod redact;
pub mod registry;
pub mod sample;
pub mod time_key;


pub use chain::{ExecutionMode, FilterChain};
pub use error::TransformError;
pub use filter::{ErrorEventSink, Filter, FilterCaps, FilterRef, Verdict};
pub use grep::{Condition, GrepAction, GrepConfig, GrepFactory, GrepFilter, MatchMode, Operator};
pub use noop::{NoopFactory, NoopFilter};
pub use redact::{PatternType, PseudonymHasher, RedactConfig, RedactFactory, RedactFilter, RedactStrategy};
pub use registry::{FilterFactory, FilterOptions, FilterRegistry, KNOWN_FILTER_TYPES, default_registry};
pub use sample::{SampleFactory, SampleFilter};
pub use time_key::{TimeKeyConfig, TimeKeyFactory, TimeKeyFilter};

/// Result type for filter operations
pub type TransformResult<T> = Result<T, TransformError>;
