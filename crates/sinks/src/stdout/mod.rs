//! Stdout Output - Human-readable debug output
//!
//! Writes one line per record: the event time, the tag and the record.
//! Not intended for production use at high throughput.
//!
//! # Example Output
//!
//! ```text
//! 2026-03-01T07:34:59.161Z access.web: {"path":"/","status":200}
//! 2026-03-01T07:34:59.162Z app.error: {"message":"failed"}
//! ```

use std::io::{self, Write};

use owo_colors::{OwoColorize, Style};
use parking_lot::Mutex;
use ripple_protocol::{EventBatch, EventTime, Record};

use crate::{Output, Result, SinkError, SinkMetrics};


/// How records are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StdoutFormat {
    /// Compact single-line JSON
    #[default]
    Json,
    /// Key/value pairs, `{"k"=>"v"}`
    Hash,
}

impl StdoutFormat {
    /// Parse a format name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "json" => Some(Self::Json),
            "hash" => Some(Self::Hash),
            _ => None,
        }
    }
}

/// Configuration for stdout output
#[derive(Debug, Clone)]
pub struct StdoutConfig {
    /// Enable colored output
    pub color: bool,

    /// Record rendering
    pub format: StdoutFormat,

    /// Maximum records to print per batch (0 = all)
    pub max_records: usize,
}

impl Default for StdoutConfig {
    fn default() -> Self {
        Self {
            color: true,
            format: StdoutFormat::Json,
            max_records: 0,
        }
    }
}

impl StdoutConfig {
    /// Create config with colors disabled (for piped output)
    pub fn no_color() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }
}

// =============================================================================
// Color Styles
// =============================================================================

struct Styles {
    time: Style,
    tag: Style,
}

impl Styles {
    fn new(enabled: bool) -> Self {
        if enabled {
            Self {
                time: Style::new().dimmed(),
                tag: Style::new().cyan(),
            }
        } else {
            Self {
                time: Style::new(),
                tag: Style::new(),
            }
        }
    }
}

// =============================================================================
// StdoutOutput
// =============================================================================

/// Output printing records to stdout (or any writer)
pub struct StdoutOutput {
    config: StdoutConfig,
    plugin_id: Option<String>,
    writer: Mutex<Box<dyn Write + Send>>,
    metrics: SinkMetrics,
}

impl std::fmt::Debug for StdoutOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdoutOutput")
            .field("config", &self.config)
            .field("plugin_id", &self.plugin_id)
            .finish_non_exhaustive()
    }
}

impl StdoutOutput {
    /// Create a stdout output with default config
    pub fn new() -> Self {
        Self::with_config(StdoutConfig::default())
    }

    /// Create a stdout output with custom config
    pub fn with_config(config: StdoutConfig) -> Self {
        Self::with_writer(config, io::stdout())
    }

    /// Create an output writing to `writer` instead of stdout
    pub fn with_writer(config: StdoutConfig, writer: impl Write + Send + 'static) -> Self {
        Self {
            config,
            plugin_id: None,
            writer: Mutex::new(Box::new(writer)),
            metrics: SinkMetrics::new(),
        }
    }

    /// Set the plugin id
    pub fn with_plugin_id(mut self, id: impl Into<String>) -> Self {
        self.plugin_id = Some(id.into());
        self
    }

    /// Get reference to metrics
    #[inline]
    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    /// Render the whole batch before taking the writer lock
    fn render(&self, tag: &str, batch: &EventBatch) -> Result<String> {
        let styles = Styles::new(self.config.color);
        let limit = match self.config.max_records {
            0 => batch.len(),
            n => n.min(batch.len()),
        };

        let mut out = String::new();
        for (time, record) in batch.iter().take(limit) {
            let body = match self.config.format {
                StdoutFormat::Json => serde_json::to_string(record)?,
                StdoutFormat::Hash => format_hash(record),
            };
            out.push_str(&format_line(time, tag, &body, &styles));
            out.push('\n');
        }
        Ok(out)
    }
}

impl Default for StdoutOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for StdoutOutput {
    fn name(&self) -> &'static str {
        "stdout"
    }

    fn plugin_id(&self) -> Option<&str> {
        self.plugin_id.as_deref()
    }

    fn emit_events(&self, tag: &str, batch: &EventBatch) -> Result<()> {
        self.metrics.batch_received();

        let text = self.render(tag, batch).inspect_err(|_| self.metrics.write_error())?;

        let mut writer = self.writer.lock();
        let written = writer.write_all(text.as_bytes()).and_then(|()| writer.flush());
        if let Err(e) = written {
            self.metrics.write_error();
            return Err(SinkError::Io(e));
        }

        self.metrics.delivered(batch, text.len() as u64);
        Ok(())
    }
}

fn format_line(time: EventTime, tag: &str, body: &str, styles: &Styles) -> String {
    format!(
        "{} {}: {}",
        time.style(styles.time),
        tag.style(styles.tag),
        body
    )
}

/// Render a record as `{"k"=>v, ...}`
fn format_hash(record: &Record) -> String {
    let pairs: Vec<String> = record
        .iter()
        .map(|(k, v)| format!("{:?}=>{}", k, v))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}
