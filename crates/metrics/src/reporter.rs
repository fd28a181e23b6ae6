//! Periodic counter reporter
//!
//! Logs every scope of a counter backend at a fixed interval until
//! cancelled, with the growth since the previous report.

use std::sync::Arc;
use std::time::Duration;

use ripple_config::{MetricsConfig, MetricsFormat};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{CounterBackend, CounterSnapshot, HumanFormatter, JsonFormatter, MetricsFormatter};

/// Logs counter snapshots at an interval
pub struct CounterReporter {
    backend: Arc<dyn CounterBackend>,
    formatter: Box<dyn MetricsFormatter>,
    interval: Duration,
    previous: Option<CounterSnapshot>,
}

impl CounterReporter {
    /// Create a reporter for `backend`
    pub fn new(backend: Arc<dyn CounterBackend>, format: MetricsFormat, interval: Duration) -> Self {
        let formatter: Box<dyn MetricsFormatter> = match format {
            MetricsFormat::Human => Box::new(HumanFormatter::new()),
            MetricsFormat::Json => Box::new(JsonFormatter::new()),
        };

        Self {
            backend,
            formatter,
            interval,
            previous: None,
        }
    }

    /// Run the reporter until cancellation
    ///
    /// Returns immediately for a zero interval.
    pub async fn run(mut self, cancel: CancellationToken) {
        if self.interval.is_zero() {
            return;
        }

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately
        ticker.tick().await;

        info!(interval_secs = self.interval.as_secs(), "counter reporter started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    for line in self.report() {
                        info!("{}", line);
                    }
                }
            }
        }
    }

    /// Format the current snapshot, one line per scope
    pub fn report(&mut self) -> Vec<String> {
        let snapshot = self.backend.snapshot();
        let delta = self.previous.as_ref().map(|prev| snapshot.since(prev));
        let interval_secs = self.interval.as_secs();

        let lines = snapshot
            .iter()
            .map(|(scope, counters)| {
                let scope_delta = delta.as_ref().and_then(|d| d.scope(scope));
                self.formatter
                    .format_scope(scope, counters, scope_delta, interval_secs)
            })
            .collect();

        self.previous = Some(snapshot);
        lines
    }
}

/// Spawn a reporter if `config` asks for periodic reports
pub fn spawn_counter_reporter(
    backend: Arc<dyn CounterBackend>,
    config: &MetricsConfig,
    cancel: CancellationToken,
) -> Option<JoinHandle<()>> {
    if !config.reports() {
        return None;
    }

    let reporter = CounterReporter::new(backend, config.format, config.interval);
    Some(tokio::spawn(reporter.run(cancel)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CounterDescriptor, CounterIncrement, MemoryCounterBackend};

    fn backend() -> Arc<MemoryCounterBackend> {
        let backend = Arc::new(MemoryCounterBackend::new());
        backend
            .init("out", &[CounterDescriptor::numeric("out_route_count")])
            .unwrap();
        backend
    }

    #[test]
    fn test_report_includes_delta_after_first() {
        let backend = backend();
        let mut reporter = CounterReporter::new(backend.clone(), MetricsFormat::Human, Duration::from_secs(1));

        backend.inc("out", &[CounterIncrement::new("out_route_count", 5)]).unwrap();
        assert_eq!(reporter.report(), vec!["[metrics] out: route_count=5"]);

        backend.inc("out", &[CounterIncrement::new("out_route_count", 2)]).unwrap();
        assert_eq!(reporter.report(), vec!["[metrics] out: route_count=7 (+2)"]);
    }

    #[test]
    fn test_report_empty_backend() {
        let mut reporter = CounterReporter::new(
            Arc::new(MemoryCounterBackend::new()),
            MetricsFormat::Json,
            Duration::from_secs(1),
        );
        assert!(reporter.report().is_empty());
    }

    #[tokio::test]
    async fn test_run_zero_interval_returns() {
        let reporter = CounterReporter::new(backend(), MetricsFormat::Human, Duration::ZERO);
        reporter.run(CancellationToken::new()).await;
    }

    #[tokio::test]
    async fn test_run_cancellation() {
        let reporter = CounterReporter::new(backend(), MetricsFormat::Human, Duration::from_millis(10));
        let cancel = CancellationToken::new();

        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            cancel_clone.cancel();
        });

        reporter.run(cancel).await;
    }

    #[tokio::test]
    async fn test_spawn_respects_config() {
        let disabled = MetricsConfig {
            enabled: false,
            ..MetricsConfig::default()
        };
        assert!(spawn_counter_reporter(backend(), &disabled, CancellationToken::new()).is_none());

        let cancel = CancellationToken::new();
        let enabled = MetricsConfig {
            interval: Duration::from_millis(10),
            ..MetricsConfig::default()
        };
        let handle = spawn_counter_reporter(backend(), &enabled, cancel.clone()).unwrap();
        cancel.cancel();
        handle.await.unwrap();
    }
}
