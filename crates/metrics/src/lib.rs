//! Ripple - Metrics
//!
//! Named counters grouped by scope, and a reporter that logs them.
//!
//! # Overview
//!
//! The router owns a [`CounterBackend`]. At setup it declares, per scope,
//! the counters it will increment; each routed batch then adds to them.
//! A scope is normally a collector's plugin id.
//!
//! ```text
//! EventRouter ──init(scope, descriptors)──► CounterBackend ◄──snapshot()── CounterReporter
//!             ──inc(scope, increments)────►                                    │
//!                                                                       tracing::info!
//! ```
//!
//! # Design Principles
//!
//! - **Lock-light**: increments take a read lock and an atomic add
//! - **Fallible, never fatal**: backends return [`MetricsError`]; callers log
//!   and carry on
//! - **Trait-based**: the router only sees `dyn CounterBackend`
//!
//! # Example
//!
//! ```
//! use ripple_metrics::{CounterBackend, CounterDescriptor, CounterIncrement, MemoryCounterBackend};
//!
//! let backend = MemoryCounterBackend::new();
//! backend.init("out_stdout", &[CounterDescriptor::numeric("out_stdout_route_count")]).unwrap();
//! backend.inc("out_stdout", &[CounterIncrement::new("out_stdout_route_count", 3)]).unwrap();
//!
//! assert_eq!(backend.snapshot().get("out_stdout", "out_stdout_route_count"), Some(3));
//! ```

mod backend;
mod error;
pub mod format;
mod memory;
mod reporter;

pub use backend::{CounterBackend, CounterDescriptor, CounterIncrement, CounterKind, CounterSnapshot};
pub use error::{MetricsError, Result};
pub use format::{HumanFormatter, JsonFormatter, MetricsFormatter};
pub use memory::MemoryCounterBackend;
pub use reporter::{CounterReporter, spawn_counter_reporter};

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter wrapper for convenient metric operations
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    /// Create a new counter initialized to 0
    #[inline]
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Increment the counter by `val` (relaxed ordering for performance)
    #[inline]
    pub fn add(&self, val: u64) {
        self.0.fetch_add(val, Ordering::Relaxed);
    }

    /// Increment the counter by 1
    #[inline]
    pub fn inc(&self) {
        self.add(1);
    }

    /// Get the current value (relaxed ordering)
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}
