//! Ripple - Pipeline
//!
//! The event router that connects sources to filters and outputs by tag.
//!
//! # Architecture
//!
//! ```text
//! [Sources]                 [EventRouter]                         [Outputs]
//!   dummy ──┐                                                  ┌──→ stdout
//!   app ────┼──→ emit(tag) ──→ MatchCache ──→ Route::Output ───┼──→ copy ──→ ...
//!   ... ────┘                  (FIFO, 1024)   Route::Pipeline ─┘
//!                                  │            [FilterChain] → output
//!                                  └─ miss: scan rules in order
//! ```
//!
//! # Key Design
//!
//! - **Synchronous**: emit runs filters and outputs on the caller's thread
//! - **First match wins**: filter rules accumulate, the first output rule
//!   terminates; pattern specificity never reorders rules
//! - **Memoized resolution**: each distinct tag is resolved once and cached
//!   with FIFO eviction
//! - **Errors are reported, not returned**: emit hands failures to an
//!   [`EmitErrorHandler`]
//! - **Optional counters**: per-scope routed records and bytes go to a
//!   `CounterBackend` when one is configured
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use ripple_pipeline::{EventRouter, LogErrorHandler, Route};
//! use ripple_protocol::{EventTime, Record};
//! use ripple_sinks::{NullOutput, Output, StdoutOutput};
//! use ripple_transform::{FilterRef, NoopFilter};
//!
//! let mut router = EventRouter::new(Arc::new(NullOutput::unmatched()), Arc::new(LogErrorHandler));
//! router.add_rule("app.**", FilterRef::new(Arc::new(NoopFilter::new()))).unwrap();
//! router.add_rule("app.**", Arc::new(StdoutOutput::new()) as Arc<dyn Output>).unwrap();
//!
//! assert!(matches!(router.route_for("app.web"), Route::Pipeline(_)));
//! assert!(!router.matches("sys.kernel"));
//! ```

mod collector;
mod error;
mod handler;
pub mod metrics;
mod pipeline;
mod router;

pub use collector::{ANONYMOUS_SCOPE, Collector, Route, output_scope};
pub use error::{EmitError, Result};
pub use handler::{EmitErrorHandler, LogErrorHandler};
pub use metrics::{MetricsRecorder, RouterStats, RouterStatsSnapshot};
pub use pipeline::Pipeline;
pub use router::EventRouter;

// Re-export key types from dependencies for convenience
pub use ripple_routing::{MATCH_CACHE_SIZE, RoutingError};

#[cfg(test)]
mod testing;
