//! Time Key Filter - Take the event time from a record field
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | `key` | string | `"time"` | Field holding the time (epoch seconds or RFC 3339) |
//! | `keep_key` | bool | `false` | Leave the field in the record |
//! | `required` | bool | `true` | Fail records without the field instead of passing them |

use std::sync::Arc;

use ripple_protocol::{EventTime, Record};
use serde::Deserialize;

use crate::registry::{FilterFactory, FilterOptions};
use crate::{Filter, TransformError, TransformResult, Verdict};

/// Configuration for the time key filter
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeKeyConfig {
    /// Field holding the time
    pub key: String,
    /// Leave the field in the record
    pub keep_key: bool,
    /// Fail records without the field
    pub required: bool,
}

impl Default for TimeKeyConfig {
    fn default() -> Self {
        Self {
            key: "time".to_string(),
            keep_key: false,
            required: true,
        }
    }
}

/// Sets the event time from a record field
#[derive(Debug)]
pub struct TimeKeyFilter {
    config: TimeKeyConfig,
}

impl TimeKeyFilter {
    /// Create a new time key filter
    pub fn new(config: TimeKeyConfig) -> TransformResult<Self> {
        if config.key.is_empty() {
            return Err(TransformError::config("time_key: key must not be empty"));
        }
        Ok(Self { config })
    }
}

impl Filter for TimeKeyFilter {
    fn name(&self) -> &'static str {
        "time_key"
    }

    fn has_filter_with_time(&self) -> bool {
        true
    }

    fn filter_with_time(
        &self,
        _tag: &str,
        time: &mut EventTime,
        record: &mut Record,
    ) -> TransformResult<Verdict> {
        let Some(value) = record.get(&self.config.key) else {
            if self.config.required {
                return Err(TransformError::missing_field(&self.config.key));
            }
            return Ok(Verdict::Keep);
        };

        *time = EventTime::parse_value(value)?;
        if !self.config.keep_key {
            record.remove(&self.config.key);
        }
        Ok(Verdict::Keep)
    }
}

/// Factory for time key filters
#[derive(Debug, Clone, Copy)]
pub struct TimeKeyFactory;

impl FilterFactory for TimeKeyFactory {
    fn create(&self, options: &FilterOptions) -> TransformResult<Arc<dyn Filter>> {
        let config: TimeKeyConfig = toml::Value::Table(options.clone())
            .try_into()
            .map_err(|e| TransformError::config(format!("invalid time_key options: {e}")))?;
        Ok(Arc::new(TimeKeyFilter::new(config)?))
    }

    fn name(&self) -> &'static str {
        "time_key"
    }
}

#[cfg(test)]
#[path = "time_key_test.rs"]
mod tests;
