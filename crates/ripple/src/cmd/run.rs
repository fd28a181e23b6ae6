//! Run command - start sources and route until interrupted

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ripple_config::Config;
use ripple_metrics::{CounterBackend, spawn_counter_reporter};
use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::builder::{build_router, build_sources};

/// Time each task gets to finish after cancellation
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Run until Ctrl-C or SIGTERM
pub async fn run(config: Config) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        "ripple starting"
    );

    let assembly = build_router(&config)?;
    let router = Arc::new(assembly.router);
    router.setup_metric_counter();

    let cancel = CancellationToken::new();

    let reporter = assembly.counters.and_then(|backend| {
        let backend: Arc<dyn CounterBackend> = backend;
        spawn_counter_reporter(backend, &config.metrics, cancel.child_token())
    });

    let sources = build_sources(&config, &router)?;
    if sources.is_empty() {
        info!("no sources configured, waiting for shutdown");
    }

    let source_tasks: Vec<JoinHandle<()>> = sources
        .into_iter()
        .map(|source| {
            let cancel = cancel.child_token();
            tokio::spawn(async move { source.run(cancel).await })
        })
        .collect();

    info!(
        rules = router.rules().len(),
        sources = source_tasks.len(),
        default = router.default_output().name(),
        "ripple running"
    );

    wait_for_shutdown().await;

    info!("shutdown signal received, stopping sources...");
    router.suppress_missing_match();
    cancel.cancel();

    for task in source_tasks {
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "source task panicked during shutdown"),
            Err(_) => warn!("source task did not finish within timeout, continuing shutdown"),
        }
    }

    if let Some(task) = reporter {
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "counter reporter panicked"),
            Err(_) => warn!("counter reporter did not finish within timeout"),
        }
    }

    router.teardown_metric_counter();

    let stats = router.stats();
    info!(
        batches = stats.batches_emitted,
        records = stats.records_emitted,
        emit_errors = stats.emit_errors,
        error_events = stats.error_events,
        cache_hits = stats.cache.hits,
        cache_misses = stats.cache.misses,
        "ripple shutdown complete"
    );
    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM
///
/// A signal that cannot be installed is logged and never fires.
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
