//! Event Router - Tag-based dispatch to filters and outputs
//!
//! The `EventRouter` receives events from sources and delivers them along
//! the route their tag resolves to. Resolution walks the rule list once per
//! distinct tag; the result is memoized in a bounded [`MatchCache`].
//!
//! # Resolution
//!
//! Rules are scanned in registration order:
//!
//! 1. A matching filter rule joins a pipeline created on demand; the scan
//!    continues
//! 2. A matching output rule ends the scan. It terminates the pipeline, or
//!    is returned directly when no filter matched
//! 3. Filters without a matching output are terminated by the default output
//! 4. No match at all resolves to the default output
//!
//! Rule position decides; pattern specificity is ignored.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use ripple_metrics::CounterBackend;
use ripple_protocol::{Entry, EventBatch, EventTime, Record};
use ripple_routing::{MATCH_CACHE_SIZE, MatchCache, Rule};
use ripple_sinks::Output;
use ripple_transform::{ErrorEventSink, TransformError};

use crate::handler::ErrorForwarder;
use crate::metrics::{MetricsRecorder, RouterStats, RouterStatsSnapshot};
use crate::{Collector, EmitErrorHandler, Pipeline, Route};

/// Routes tagged events to collectors
///
/// # Design
///
/// - Rules are fixed once the router is shared: `add_rule` takes `&mut self`
/// - Emit never fails; errors go to the [`EmitErrorHandler`]
/// - A tag's pipeline is built once; concurrent first lookups of the same
///   tag wait on the cache lock instead of building twice
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use ripple_pipeline::{EventRouter, LogErrorHandler};
/// use ripple_protocol::{EventTime, Record};
/// use ripple_sinks::{MemoryOutput, NullOutput, Output};
///
/// let memory = Arc::new(MemoryOutput::new());
/// let mut router = EventRouter::new(Arc::new(NullOutput::new()), Arc::new(LogErrorHandler));
/// router.add_rule("app.**", memory.clone() as Arc<dyn Output>).unwrap();
///
/// router.emit("app.web", EventTime::now(), Record::new());
/// router.emit("sys.kernel", EventTime::now(), Record::new());
///
/// assert_eq!(memory.record_count(), 1);
/// ```
pub struct EventRouter {
    /// Rules in registration order
    rules: Vec<Rule<Collector>>,

    /// Tag → resolved route
    cache: MatchCache<Route>,

    /// Destination of unmatched tags and unterminated pipelines
    default_output: Arc<dyn Output>,

    /// Handler wrapper shared with every pipeline
    errors: Arc<ErrorForwarder>,

    /// Always-on router counters
    stats: Arc<RouterStats>,

    /// Per-scope routed counts, when a backend is configured
    metrics: Option<MetricsRecorder>,
}

impl EventRouter {
    /// Create a router with no rules
    pub fn new(default_output: Arc<dyn Output>, error_handler: Arc<dyn EmitErrorHandler>) -> Self {
        let stats = Arc::new(RouterStats::new());
        Self {
            rules: Vec::new(),
            cache: MatchCache::new(MATCH_CACHE_SIZE),
            default_output,
            errors: Arc::new(ErrorForwarder::new(error_handler, Arc::clone(&stats))),
            stats,
            metrics: None,
        }
    }

    /// Bound the match cache to `capacity` tags (minimum 1)
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = MatchCache::new(capacity);
        self
    }

    /// Count routed records and bytes per scope in `backend`
    pub fn with_counter_backend(mut self, backend: Arc<dyn CounterBackend>) -> Self {
        self.metrics = Some(MetricsRecorder::new(backend));
        self
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Append a rule
    ///
    /// `pattern` is parsed here; malformed text is a configuration error.
    pub fn add_rule(&mut self, pattern: &str, collector: impl Into<Collector>) -> ripple_routing::Result<()> {
        let rule = Rule::new(pattern, collector.into())?;
        tracing::debug!(
            pattern = rule.pattern_str(),
            collector = %rule.collector(),
            position = self.rules.len(),
            "added routing rule"
        );
        self.rules.push(rule);
        self.cache.clear();
        Ok(())
    }

    /// Replace the default output
    pub fn set_default_output(&mut self, output: Arc<dyn Output>) {
        self.default_output = output;
        self.cache.clear();
    }

    /// Rules in registration order
    pub fn rules(&self) -> &[Rule<Collector>] {
        &self.rules
    }

    /// Default output
    pub fn default_output(&self) -> &Arc<dyn Output> {
        &self.default_output
    }

    // ========================================================================
    // Emit
    // ========================================================================

    /// Route a single event
    pub fn emit(&self, tag: &str, time: EventTime, record: Record) {
        self.emit_stream(tag, &EventBatch::one(time, record));
    }

    /// Route a list of events
    pub fn emit_array(&self, tag: &str, entries: Vec<Entry>) {
        self.emit_stream(tag, &EventBatch::array(entries));
    }

    /// Route a batch
    ///
    /// Failures are reported to the error handler; counters are only
    /// incremented for delivered batches.
    pub fn emit_stream(&self, tag: &str, batch: &EventBatch) {
        self.stats.record_emitted(batch.len() as u64);
        let route = self.route_for(tag);

        match route.emit_events(tag, batch) {
            Ok(()) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record(route.scope(), batch);
                }
            }
            Err(e) => self.errors.handle_emits_error(tag, batch, &e),
        }
    }

    /// Report a record that failed outside a pipeline
    pub fn emit_error_event(&self, tag: &str, time: EventTime, record: &Record, error: &TransformError) {
        self.errors.emit_error_event(tag, time, record, error);
    }

    /// Silence the default output's unmatched-tag warnings
    pub fn suppress_missing_match(&self) {
        self.default_output.suppress_missing_match();
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve `tag`, through the cache
    pub fn route_for(&self, tag: &str) -> Route {
        self.cache.get_or_insert_with(tag, || {
            self.find(tag)
                .unwrap_or_else(|| Route::Output(Arc::clone(&self.default_output)))
        })
    }

    /// True if any rule matches `tag`; the default output does not count
    pub fn matches(&self, tag: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(tag))
    }

    fn find(&self, tag: &str) -> Option<Route> {
        let mut pipeline: Option<Pipeline> = None;

        for rule in self.rules.iter().filter(|rule| rule.matches(tag)) {
            match rule.collector() {
                Collector::Filter(filter) => {
                    pipeline
                        .get_or_insert_with(|| Pipeline::new(self.error_sink()))
                        .add_filter(filter.clone());
                }
                Collector::Output(output) => {
                    let Some(mut pipeline) = pipeline else {
                        return Some(Route::Output(Arc::clone(output)));
                    };
                    pipeline.set_output(Arc::clone(output));
                    return Some(self.built(tag, pipeline));
                }
            }
        }

        pipeline.map(|mut pipeline| {
            pipeline.set_output(Arc::clone(&self.default_output));
            self.built(tag, pipeline)
        })
    }

    fn built(&self, tag: &str, pipeline: Pipeline) -> Route {
        tracing::debug!(
            tag,
            filters = ?pipeline.chain().names(),
            output = pipeline.output().map(|o| o.name()),
            "built pipeline"
        );
        Route::Pipeline(Arc::new(pipeline))
    }

    fn error_sink(&self) -> Arc<dyn ErrorEventSink> {
        self.errors.clone()
    }

    // ========================================================================
    // Metrics
    // ========================================================================

    /// Declare route counters for every rule's collector scope
    ///
    /// No-op without a counter backend.
    pub fn setup_metric_counter(&self) {
        let Some(metrics) = &self.metrics else {
            return;
        };

        let mut seen = HashSet::new();
        for rule in &self.rules {
            let scope = rule.collector().scope();
            if seen.insert(scope) {
                metrics.init_scope(scope);
            }
        }
        tracing::info!(scopes = ?metrics.scopes(), "route counters ready");
    }

    /// Stop the counter backend
    pub fn teardown_metric_counter(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.stop();
        }
    }

    /// Scopes with declared route counters, sorted
    pub fn counter_scopes(&self) -> Vec<String> {
        self.metrics
            .as_ref()
            .map(MetricsRecorder::scopes)
            .unwrap_or_default()
    }

    /// Router counters with match cache statistics
    pub fn stats(&self) -> RouterStatsSnapshot {
        RouterStatsSnapshot {
            cache: self.cache.stats().snapshot(),
            ..self.stats.snapshot()
        }
    }

    /// Number of tags currently cached
    pub fn cached_tags(&self) -> usize {
        self.cache.len()
    }
}

impl fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRouter")
            .field("rules", &self.rules.len())
            .field("default_output", &self.default_output.name())
            .field("cached_tags", &self.cache.len())
            .field("metrics", &self.metrics)
            .finish()
    }
}
