//! Redact Filter - Mask, remove or pseudonymize sensitive fields
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | `strategy` | string | `"mask"` | `mask`, `remove` or `hash` |
//! | `hash_key` | string | - | Secret key for hashing (required if strategy=hash) |
//! | `fields` | array | - | Field paths redacted as a whole (dot notation) |
//! | `patterns` | array | - | Built-in patterns scanned inside every string value |
//! | `replacement` | string | `"[REDACTED]"` | Text used by the mask strategy |
//!
//! ## Built-in Patterns
//!
//! | Pattern | Hash Prefix |
//! |---------|-------------|
//! | `email` | `usr_` |
//! | `credit_card` | `cc_` |
//! | `ssn_us` | `ssn_` |
//! | `ipv4` | `ip4_` |
//! | `iban` | `iba_` |
//!
//! # TOML Example
//!
//! ```toml
//! [filters.scrub]
//! type = "redact"
//! strategy = "hash"
//! hash_key = "workspace-secret"
//! fields = ["password", "user.ssn"]
//! patterns = ["email"]
//! ```

mod config;
mod hasher;
mod patterns;

pub use config::{DEFAULT_REPLACEMENT, PatternType, RedactConfig, RedactStrategy};
pub use hasher::{DEFAULT_PREFIX, PseudonymHasher};
pub use patterns::CompiledPattern;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ripple_protocol::{EventTime, Record};
use serde_json::Value;

use crate::registry::{FilterFactory, FilterOptions};
use crate::{Filter, TransformError, TransformResult, Verdict};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

/// Counters for the redact filter
#[derive(Debug, Default)]
pub struct RedactMetrics {
    /// Records processed
    pub records_processed: AtomicU64,
    /// Whole fields redacted
    pub fields_redacted: AtomicU64,
    /// Pattern matches replaced inside strings
    pub patterns_matched: AtomicU64,
}

/// Redact filter. Stateless apart from counters.
#[derive(Debug)]
pub struct RedactFilter {
    config: RedactConfig,
    patterns: Vec<CompiledPattern>,
    hasher: Option<PseudonymHasher>,
    metrics: RedactMetrics,
}

impl RedactFilter {
    /// Create a new redact filter
    pub fn new(config: RedactConfig) -> TransformResult<Self> {
        config.validate().map_err(TransformError::config)?;

        let hasher = match (&config.strategy, &config.hash_key) {
            (RedactStrategy::Hash, Some(key)) => Some(PseudonymHasher::new(key)?),
            _ => None,
        };

        let patterns = config
            .patterns
            .iter()
            .map(|kind| {
                kind.compile()
                    .map(|regex| CompiledPattern { kind: *kind, regex })
                    .map_err(|e| TransformError::config(format!("pattern {kind:?}: {e}")))
            })
            .collect::<TransformResult<Vec<_>>>()?;

        Ok(Self {
            config,
            patterns,
            hasher,
            metrics: RedactMetrics::default(),
        })
    }

    /// Get filter counters
    pub fn metrics(&self) -> &RedactMetrics {
        &self.metrics
    }

    fn redact_field(&self, record: &mut Record, path: &str) {
        let Some((parent_path, key)) = split_parent(path) else {
            return;
        };

        let parent = match parent_path {
            Some(parent_path) => match get_object_mut(record, parent_path) {
                Some(obj) => obj,
                None => return,
            },
            None => record,
        };

        if !parent.contains_key(key) {
            return;
        }
        self.metrics.fields_redacted.fetch_add(1, Ordering::Relaxed);

        match self.config.strategy {
            RedactStrategy::Remove => {
                parent.remove(key);
            }
            RedactStrategy::Mask => {
                parent.insert(key.to_string(), Value::String(self.config.replacement.clone()));
            }
            RedactStrategy::Hash => {
                if let Some(value) = parent.get_mut(key) {
                    let text = match &*value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    *value = Value::String(self.replace(&text, DEFAULT_PREFIX));
                }
            }
        }
    }

    fn scan_value(&self, value: &mut Value) {
        match value {
            Value::String(s) => {
                if let Some(redacted) = self.scan_string(s) {
                    *s = redacted;
                }
            }
            Value::Array(items) => items.iter_mut().for_each(|v| self.scan_value(v)),
            Value::Object(map) => map.values_mut().for_each(|v| self.scan_value(v)),
            _ => {}
        }
    }

    /// Replace every pattern match; `None` when nothing matched
    fn scan_string(&self, text: &str) -> Option<String> {
        let mut current: Option<String> = None;

        for pattern in &self.patterns {
            let source = current.as_deref().unwrap_or(text);
            let mut hits = 0u64;
            let replaced = pattern.regex.replace_all(source, |caps: &regex::Captures<'_>| {
                hits += 1;
                self.replace(&caps[0], pattern.kind.hash_prefix())
            });
            if hits > 0 {
                self.metrics.patterns_matched.fetch_add(hits, Ordering::Relaxed);
                current = Some(replaced.into_owned());
            }
        }

        current
    }

    fn replace(&self, value: &str, prefix: &str) -> String {
        match &self.hasher {
            Some(hasher) => hasher.hash(value, prefix),
            None => self.config.replacement.clone(),
        }
    }
}

impl Filter for RedactFilter {
    fn name(&self) -> &'static str {
        "redact"
    }

    fn filter(&self, _tag: &str, _time: EventTime, record: &mut Record) -> TransformResult<Verdict> {
        self.metrics.records_processed.fetch_add(1, Ordering::Relaxed);

        for path in &self.config.fields {
            self.redact_field(record, path);
        }

        if !self.patterns.is_empty() {
            record.values_mut().for_each(|v| self.scan_value(v));
        }

        Ok(Verdict::Keep)
    }
}

/// Factory for creating redact filters
#[derive(Debug, Clone, Copy)]
pub struct RedactFactory;

impl FilterFactory for RedactFactory {
    fn create(&self, options: &FilterOptions) -> TransformResult<Arc<dyn Filter>> {
        let config = RedactConfig::try_from(options).map_err(TransformError::config)?;
        Ok(Arc::new(RedactFilter::new(config)?))
    }

    fn name(&self) -> &'static str {
        "redact"
    }

    fn default_options(&self) -> Option<FilterOptions> {
        let mut options = FilterOptions::new();
        options.insert("strategy".to_string(), toml::Value::String("mask".to_string()));
        Some(options)
    }
}

/// Split `a.b.c` into `(Some("a.b"), "c")`
fn split_parent(path: &str) -> Option<(Option<&str>, &str)> {
    if path.is_empty() {
        return None;
    }
    Some(match path.rsplit_once('.') {
        Some((parent, key)) => (Some(parent), key),
        None => (None, path),
    })
}

fn get_object_mut<'a>(record: &'a mut Record, path: &str) -> Option<&'a mut Record> {
    let mut parts = path.split('.');
    let mut current = record.get_mut(parts.next()?)?.as_object_mut()?;
    for part in parts {
        current = current.get_mut(part)?.as_object_mut()?;
    }
    Some(current)
}
