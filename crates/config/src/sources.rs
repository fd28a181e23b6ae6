//! Source configuration
//!
//! ```toml
//! [[sources]]
//! type = "dummy"
//! tag = "access.web"
//! rate = 5
//! auto_increment_key = "seq"
//! records = [{ message = "dummy" }]
//! ```

use serde::Deserialize;

/// Configuration for a single source
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Synthetic records at a fixed rate
    Dummy(DummySourceConfig),
}

impl SourceConfig {
    /// Source type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Dummy(_) => "dummy",
        }
    }
}

/// Dummy source options
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DummySourceConfig {
    /// Tag of every generated event
    pub tag: String,

    /// Events per second
    #[serde(default = "default_rate")]
    pub rate: u32,

    /// Field set to an increasing counter on every event
    #[serde(default)]
    pub auto_increment_key: Option<String>,

    /// Records to cycle through
    #[serde(default = "default_records")]
    pub records: Vec<toml::Table>,
}

fn default_rate() -> u32 {
    1
}

fn default_records() -> Vec<toml::Table> {
    let mut record = toml::Table::new();
    record.insert("message".to_string(), toml::Value::String("dummy".to_string()));
    vec![record]
}
