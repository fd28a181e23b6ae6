//! Dummy Source - Synthetic events at a fixed rate
//!
//! Emits records from a configured list to one tag, cycling through the
//! list. Useful for exercising routes without any real input.
//!
//! # Rate
//!
//! Each second is split into [`BINS_PER_SECOND`] bins of 100ms. Every bin
//! emits `rate / 10` events; the remaining `rate % 10` go out after the last
//! bin. The source then waits for the second to end.
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | `tag` | string | - | Tag of every event |
//! | `rate` | integer | `1` | Events per second |
//! | `auto_increment_key` | string | - | Field set to 0, 1, 2, ... on each event |
//! | `records` | array | `[{message = "dummy"}]` | Records to cycle through |

mod generator;

pub use generator::RecordGenerator;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use ripple_pipeline::EventRouter;
use ripple_protocol::{EventBatch, EventTime, Record};
use serde_json::json;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use crate::{SourceError, SourceMetrics};


/// Rate bins per second
pub const BINS_PER_SECOND: u32 = 10;

const BIN_INTERVAL: Duration = Duration::from_millis(100);
const SECOND: Duration = Duration::from_secs(1);

/// Dummy source configuration
#[derive(Debug, Clone)]
pub struct DummySourceConfig {
    /// Tag of every generated event
    pub tag: String,

    /// Events per second
    pub rate: u32,

    /// Field set to an increasing counter on every event
    pub auto_increment_key: Option<String>,

    /// Records to cycle through
    pub records: Vec<Record>,
}

impl Default for DummySourceConfig {
    fn default() -> Self {
        let mut record = Record::new();
        record.insert("message".to_string(), json!("dummy"));
        Self {
            tag: "dummy".to_string(),
            rate: 1,
            auto_increment_key: None,
            records: vec![record],
        }
    }
}

impl DummySourceConfig {
    /// Check the configuration
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.tag.is_empty() {
            return Err(SourceError::config("dummy", "tag must not be empty"));
        }
        if self.rate == 0 {
            return Err(SourceError::config("dummy", "rate must be > 0"));
        }
        if self.records.is_empty() {
            return Err(SourceError::config("dummy", "records must not be empty"));
        }
        Ok(())
    }

    /// Events per bin and events after the last bin
    pub fn split_rate(&self) -> (u32, u32) {
        (self.rate / BINS_PER_SECOND, self.rate % BINS_PER_SECOND)
    }
}

/// Emits synthetic events into a router
pub struct DummySource {
    config: DummySourceConfig,
    router: Arc<EventRouter>,
    generator: Mutex<RecordGenerator>,
    metrics: Arc<SourceMetrics>,
}

impl DummySource {
    /// Create a new dummy source
    pub fn new(config: DummySourceConfig, router: Arc<EventRouter>) -> Result<Self, SourceError> {
        config.validate()?;
        let generator = RecordGenerator::new(config.records.clone(), config.auto_increment_key.clone());
        Ok(Self {
            config,
            router,
            generator: Mutex::new(generator),
            metrics: Arc::new(SourceMetrics::new()),
        })
    }

    /// Source configuration
    pub fn config(&self) -> &DummySourceConfig {
        &self.config
    }

    /// Shared metrics handle
    pub fn metrics(&self) -> Arc<SourceMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Emit `count` events now
    ///
    /// The router reports delivery failures itself; nothing here can fail.
    pub fn emit(&self, count: u32) {
        if count == 0 {
            return;
        }
        let mut generator = self.generator.lock();
        let mut size = 0;
        for _ in 0..count {
            let batch = EventBatch::one(EventTime::now(), generator.generate());
            match batch.encoded_size() {
                Ok(bytes) => size += bytes,
                Err(e) => tracing::warn!(tag = %self.config.tag, error = %e, "failed to size dummy event"),
            }
            self.router.emit_stream(&self.config.tag, &batch);
        }
        self.metrics.round(u64::from(count), size);
    }

    /// Run until `cancel` fires
    pub async fn run(&self, cancel: CancellationToken) {
        let (per_bin, residual) = self.config.split_rate();

        tracing::info!(
            tag = %self.config.tag,
            rate = self.config.rate,
            records = self.config.records.len(),
            "dummy source starting"
        );

        'seconds: loop {
            let second_start = Instant::now();
            let second_end = second_start + SECOND;

            for _ in 0..BINS_PER_SECOND {
                let bin_start = Instant::now();
                if cancel.is_cancelled() {
                    break 'seconds;
                }
                if bin_start >= second_end {
                    break;
                }
                self.emit(per_bin);

                tokio::select! {
                    _ = cancel.cancelled() => break 'seconds,
                    _ = sleep_until(bin_start + BIN_INTERVAL) => {}
                }
            }

            if cancel.is_cancelled() {
                break;
            }
            self.emit(residual);

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = sleep_until(second_end) => {}
            }
        }

        let snapshot = self.metrics.snapshot();
        tracing::info!(
            tag = %self.config.tag,
            records_emitted = snapshot.records_emitted,
            emit_size = snapshot.emit_size,
            "dummy source stopped"
        );
    }
}

impl std::fmt::Debug for DummySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DummySource")
            .field("config", &self.config)
            .field("metrics", &self.metrics.snapshot())
            .finish()
    }
}
