//! Router metrics
//!
//! Two kinds of accounting live here:
//!
//! - [`RouterStats`]: atomic counters owned by the router itself, always on
//! - [`MetricsRecorder`]: per-scope routed counts pushed to a
//!   [`CounterBackend`], only when one is configured
//!
//! All atomics use relaxed ordering. Values are eventually consistent.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use ripple_metrics::{CounterBackend, CounterDescriptor, CounterIncrement};
use ripple_protocol::EventBatch;
use ripple_routing::CacheStatsSnapshot;

// ============================================================================
// Router Stats
// ============================================================================

/// Counters maintained by the router on every emit
#[derive(Debug, Default)]
pub struct RouterStats {
    /// Batches handed to `emit_stream`
    batches_emitted: AtomicU64,

    /// Records in those batches
    records_emitted: AtomicU64,

    /// Batches whose route failed
    emit_errors: AtomicU64,

    /// Records dropped after a filter error
    error_events: AtomicU64,
}

impl RouterStats {
    /// Create stats with all counters at zero
    #[inline]
    pub const fn new() -> Self {
        Self {
            batches_emitted: AtomicU64::new(0),
            records_emitted: AtomicU64::new(0),
            emit_errors: AtomicU64::new(0),
            error_events: AtomicU64::new(0),
        }
    }

    /// Record a batch entering the router
    #[inline]
    pub fn record_emitted(&self, records: u64) {
        self.batches_emitted.fetch_add(1, Ordering::Relaxed);
        self.records_emitted.fetch_add(records, Ordering::Relaxed);
    }

    /// Record a failed route
    #[inline]
    pub fn record_emit_error(&self) {
        self.emit_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a per-record filter error
    #[inline]
    pub fn record_error_event(&self) {
        self.error_events.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> RouterStatsSnapshot {
        RouterStatsSnapshot {
            batches_emitted: self.batches_emitted.load(Ordering::Relaxed),
            records_emitted: self.records_emitted.load(Ordering::Relaxed),
            emit_errors: self.emit_errors.load(Ordering::Relaxed),
            error_events: self.error_events.load(Ordering::Relaxed),
            cache: CacheStatsSnapshot::default(),
        }
    }
}

/// Snapshot of [`RouterStats`] plus match cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouterStatsSnapshot {
    /// Batches handed to `emit_stream`
    pub batches_emitted: u64,
    /// Records in those batches
    pub records_emitted: u64,
    /// Batches whose route failed
    pub emit_errors: u64,
    /// Records dropped after a filter error
    pub error_events: u64,
    /// Match cache hits, misses and evictions
    pub cache: CacheStatsSnapshot,
}

impl RouterStatsSnapshot {
    /// Fraction of batches delivered without error
    ///
    /// Returns None if nothing was emitted.
    #[inline]
    pub fn success_rate(&self) -> Option<f64> {
        if self.batches_emitted == 0 {
            None
        } else {
            let ok = self.batches_emitted.saturating_sub(self.emit_errors);
            Some(ok as f64 / self.batches_emitted as f64)
        }
    }
}

// ============================================================================
// Metrics Recorder
// ============================================================================

/// Name of the routed-records counter for a scope
pub fn route_count_name(scope: &str) -> String {
    format!("{scope}_route_count")
}

/// Name of the routed-bytes counter for a scope
pub fn route_size_name(scope: &str) -> String {
    format!("{scope}_route_size")
}

/// Pushes per-scope routed counts to a counter backend
///
/// Scopes are initialized on first use if setup did not declare them.
/// Backend failures are logged and swallowed; routing never depends on them.
pub struct MetricsRecorder {
    backend: Arc<dyn CounterBackend>,
    scopes: Mutex<HashSet<String>>,
    stopped: AtomicBool,
}

impl MetricsRecorder {
    /// Wrap a backend
    pub fn new(backend: Arc<dyn CounterBackend>) -> Self {
        Self {
            backend,
            scopes: Mutex::new(HashSet::new()),
            stopped: AtomicBool::new(false),
        }
    }

    /// Underlying backend
    pub fn backend(&self) -> &Arc<dyn CounterBackend> {
        &self.backend
    }

    /// Declare the two route counters of `scope`; no-op if already declared
    ///
    /// Returns false when the backend refused the scope.
    pub fn init_scope(&self, scope: &str) -> bool {
        let mut scopes = self.scopes.lock();
        if scopes.contains(scope) {
            return true;
        }

        let descriptors = [
            CounterDescriptor::numeric(route_count_name(scope)),
            CounterDescriptor::numeric(route_size_name(scope)),
        ];
        match self.backend.init(scope, &descriptors) {
            Ok(()) => {
                tracing::debug!(scope, "initialized route counters");
                scopes.insert(scope.to_string());
                true
            }
            Err(e) => {
                tracing::warn!(scope, error = %e, "failed to initialize route counters");
                false
            }
        }
    }

    /// Add a delivered batch to the counters of `scope`
    pub fn record(&self, scope: &str, batch: &EventBatch) {
        if self.stopped.load(Ordering::Relaxed) || !self.init_scope(scope) {
            return;
        }

        let bytes = match batch.encoded_size() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(scope, error = %e, "failed to size routed batch");
                0
            }
        };

        let increments = [
            CounterIncrement::new(route_count_name(scope), batch.len() as u64),
            CounterIncrement::new(route_size_name(scope), bytes),
        ];
        if let Err(e) = self.backend.inc(scope, &increments) {
            tracing::warn!(scope, error = %e, "failed to increment route counters");
        }
    }

    /// Declared scopes, sorted
    pub fn scopes(&self) -> Vec<String> {
        let mut scopes: Vec<String> = self.scopes.lock().iter().cloned().collect();
        scopes.sort();
        scopes
    }

    /// Stop the backend; later records are ignored
    pub fn stop(&self) {
        if self.stopped.swap(true, Ordering::Relaxed) {
            return;
        }
        if let Err(e) = self.backend.stop() {
            tracing::warn!(error = %e, "failed to stop counter backend");
        }
    }

    /// Whether [`MetricsRecorder::stop`] was called
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for MetricsRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRecorder")
            .field("scopes", &self.scopes())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
