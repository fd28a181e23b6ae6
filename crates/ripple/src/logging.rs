//! Tracing subscriber setup
//!
//! Level precedence: `--log-level` flag, then `[log] level`, then `info`.
//! `RUST_LOG` overrides all of them when set.

use std::io;

use anyhow::{Result, anyhow};
use ripple_config::{LogConfig, LogFormat, LogLevel, LogOutput};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the global tracing subscriber
pub fn init_logging(config: &LogConfig, cli_level: Option<LogLevel>) -> Result<()> {
    let level = config.effective_level(cli_level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.as_str()))
        .map_err(|e| anyhow!("invalid log level: {e}"))?;

    tracing_subscriber::registry()
        .with(fmt_layer(config.format, config.output))
        .with(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

fn fmt_layer(format: LogFormat, output: LogOutput) -> BoxedLayer {
    let layer = fmt::layer().with_target(true).with_thread_ids(false);
    match (format, output) {
        (LogFormat::Console, LogOutput::Stderr) => layer.with_writer(io::stderr).boxed(),
        (LogFormat::Console, LogOutput::Stdout) => layer.with_writer(io::stdout).boxed(),
        (LogFormat::Json, LogOutput::Stderr) => layer.json().with_writer(io::stderr).boxed(),
        (LogFormat::Json, LogOutput::Stdout) => layer.json().with_writer(io::stdout).boxed(),
    }
}
