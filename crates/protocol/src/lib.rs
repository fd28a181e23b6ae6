//! Ripple Protocol - Core event types shared by every Ripple crate
//!
//! This crate provides the foundational types that flow through the router:
//! - `EventTime` - Second + nanosecond event timestamp
//! - `Record` - Structured event body (JSON object)
//! - `EventBatch` - Ordered `(EventTime, Record)` pairs in three shapes
//! - Wire codec - Deterministic binary encoding used for size accounting
//!
//! # Batch Shapes
//!
//! | Shape | Built by | Use |
//! |-------|----------|-----|
//! | `One` | `EventBatch::one` | single `emit` calls |
//! | `Array` | `EventBatch::array` | pre-built record arrays |
//! | `Multi` | `EventBatch::multi` + `add` | filters rewriting records one at a time |
//!
//! All shapes are owned in-memory buffers handed to collectors by shared
//! reference, so every batch is repeatable: it can be iterated any number of
//! times by fan-out collectors.
//!
//! # Example
//!
//! ```
//! use ripple_protocol::{EventBatch, EventTime, Record};
//!
//! let mut record = Record::new();
//! record.insert("message".into(), "hello".into());
//!
//! let mut batch = EventBatch::multi();
//! batch.add(EventTime::new(1_700_000_000, 0), record);
//!
//! assert_eq!(batch.len(), 1);
//! assert!(batch.encoded_size().unwrap() > 0);
//! ```

mod batch;
mod error;
mod time;

pub use batch::{Entry, EventBatch, Iter};
pub use error::ProtocolError;
pub use time::EventTime;

/// Structured event body
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Separator between tag segments
pub const TAG_DELIMITER: char = '.';
