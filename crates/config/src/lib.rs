//! Ripple Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Every section is optional; an empty file builds a router that discards
//! everything.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use ripple_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[[rules]]\nmatch = \"app.**\"\ncollector = \"stdout\"").unwrap();
//! assert_eq!(config.rules.len(), 1);
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [router]
//! default = "stdout"
//!
//! [filters.scrub]
//! type = "redact"
//! fields = ["password"]
//!
//! [[rules]]
//! match = "access.**"
//! collector = "scrub"
//!
//! [[sources]]
//! type = "dummy"
//! tag = "access.web"
//! ```

mod error;
mod filters;
mod logging;
mod metrics;
mod outputs;
mod router;
mod rules;
mod sources;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use filters::{FilterConfig, FiltersConfig, KNOWN_FILTER_TYPES, is_known_filter_type};
pub use logging::{LogConfig, LogFormat, LogLevel, LogOutput};
pub use metrics::{MetricsConfig, MetricsFormat};
pub use outputs::{
    BUILTIN_OUTPUTS, CopyOutputConfig, MemoryOutputConfig, NullOutputConfig, OutputConfig, OutputsConfig,
    StdoutOutputConfig,
};
pub use router::{DEFAULT_CACHE_CAPACITY, RouterConfig};
pub use rules::RuleConfig;
pub use sources::{DummySourceConfig, SourceConfig};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Router settings (default output, cache size)
    pub router: RouterConfig,

    /// Routed-record counters
    pub metrics: MetricsConfig,

    /// Named outputs
    pub outputs: OutputsConfig,

    /// Named filters
    pub filters: FiltersConfig,

    /// Routing rules, in scan order
    pub rules: Vec<RuleConfig>,

    /// Event sources
    pub sources: Vec<SourceConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML or fails
    /// validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Names of every collector referenced by a rule, in first-use order
    pub fn referenced_collectors(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !names.contains(&rule.collector.as_str()) {
                names.push(&rule.collector);
            }
        }
        names
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
