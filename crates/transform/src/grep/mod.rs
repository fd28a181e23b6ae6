//! Grep Filter - Keep or drop records by field conditions
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | `action` | string | `"drop"` | Action when conditions match: `drop` or `keep` |
//! | `match` | string | `"all"` | How to combine conditions: `all` (AND) or `any` (OR) |
//! | `field`/`operator`/`value` | | | Single-condition shorthand |
//! | `conditions` | array | | List of conditions to evaluate |
//!
//! ## Operators
//!
//! | Operator | Description |
//! |----------|-------------|
//! | `eq` | Equal to value |
//! | `ne` | Not equal to value |
//! | `contains` | String contains value |
//! | `starts_with` | String starts with value |
//! | `ends_with` | String ends with value |
//! | `regex` | Matches regex pattern |
//! | `exists` | Field exists (value ignored) |
//! | `gt` / `lt` / `gte` / `lte` | Numeric comparison |
//!
//! # TOML Example
//!
//! ```toml
//! # Keep only production errors
//! [filters.prod_errors]
//! type = "grep"
//! action = "keep"
//! match = "all"
//!
//! [[filters.prod_errors.conditions]]
//! field = "level"
//! value = "error"
//!
//! [[filters.prod_errors.conditions]]
//! field = "env"
//! operator = "eq"
//! value = "production"
//! ```

mod config;

pub use config::{Condition, GrepAction, GrepConfig, MatchMode, Operator};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ripple_protocol::{EventTime, Record};
use serde_json::Value;

use crate::registry::{FilterFactory, FilterOptions};
use crate::{Filter, TransformError, TransformResult, Verdict};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

/// Counters for the grep filter
#[derive(Debug, Default)]
pub struct GrepMetrics {
    /// Records evaluated
    pub records_received: AtomicU64,
    /// Records passed on
    pub records_passed: AtomicU64,
    /// Records dropped
    pub records_dropped: AtomicU64,
}

impl GrepMetrics {
    /// Get drop rate (0.0 - 1.0)
    pub fn drop_rate(&self) -> f64 {
        let received = self.records_received.load(Ordering::Relaxed);
        let dropped = self.records_dropped.load(Ordering::Relaxed);
        if received == 0 {
            0.0
        } else {
            dropped as f64 / received as f64
        }
    }
}

/// Grep filter. Stateless apart from counters.
#[derive(Debug)]
pub struct GrepFilter {
    config: GrepConfig,
    metrics: GrepMetrics,
}

impl GrepFilter {
    /// Create a new grep filter
    pub fn new(config: GrepConfig) -> TransformResult<Self> {
        config.validate().map_err(TransformError::config)?;

        Ok(Self {
            config,
            metrics: GrepMetrics::default(),
        })
    }

    /// Get filter counters
    pub fn metrics(&self) -> &GrepMetrics {
        &self.metrics
    }

    /// Check if a record matches the conditions
    fn matches(&self, record: &Record) -> bool {
        match self.config.match_mode {
            MatchMode::All => self.config.conditions.iter().all(|c| eval_condition(c, record)),
            MatchMode::Any => self.config.conditions.iter().any(|c| eval_condition(c, record)),
        }
    }
}

impl Filter for GrepFilter {
    fn name(&self) -> &'static str {
        "grep"
    }

    fn filter(&self, _tag: &str, _time: EventTime, record: &mut Record) -> TransformResult<Verdict> {
        self.metrics.records_received.fetch_add(1, Ordering::Relaxed);

        let matched = self.matches(record);
        let keep = match self.config.action {
            GrepAction::Drop => !matched,
            GrepAction::Keep => matched,
        };

        if keep {
            self.metrics.records_passed.fetch_add(1, Ordering::Relaxed);
            Ok(Verdict::Keep)
        } else {
            self.metrics.records_dropped.fetch_add(1, Ordering::Relaxed);
            Ok(Verdict::Drop)
        }
    }
}

/// Factory for creating grep filters
#[derive(Debug, Clone, Copy)]
pub struct GrepFactory;

impl FilterFactory for GrepFactory {
    fn create(&self, options: &FilterOptions) -> TransformResult<Arc<dyn Filter>> {
        let config = GrepConfig::try_from(options).map_err(TransformError::config)?;
        Ok(Arc::new(GrepFilter::new(config)?))
    }

    fn name(&self) -> &'static str {
        "grep"
    }

    fn default_options(&self) -> Option<FilterOptions> {
        let mut options = FilterOptions::new();
        options.insert("action".to_string(), toml::Value::String("drop".to_string()));
        options.insert("match".to_string(), toml::Value::String("all".to_string()));
        Some(options)
    }
}

fn eval_condition(condition: &Condition, record: &Record) -> bool {
    let field_value = get_field(record, &condition.field);
    let expected = condition.value.as_deref();

    match &condition.operator {
        Operator::Exists => field_value.is_some(),

        Operator::Eq => match (field_value, expected) {
            (Some(field), Some(expected)) => value_equals(field, expected),
            _ => false,
        },

        // A missing field is not equal to anything
        Operator::Ne => match (field_value, expected) {
            (Some(field), Some(expected)) => !value_equals(field, expected),
            _ => true,
        },

        Operator::Contains => string_test(field_value, expected, |s, v| s.contains(v)),
        Operator::StartsWith => string_test(field_value, expected, |s, v| s.starts_with(v)),
        Operator::EndsWith => string_test(field_value, expected, |s, v| s.ends_with(v)),

        Operator::Regex(re) => field_value
            .and_then(value_as_string)
            .is_some_and(|s| re.is_match(&s)),

        Operator::Gt => numeric_compare(field_value, expected, |a, b| a > b),
        Operator::Lt => numeric_compare(field_value, expected, |a, b| a < b),
        Operator::Gte => numeric_compare(field_value, expected, |a, b| a >= b),
        Operator::Lte => numeric_compare(field_value, expected, |a, b| a <= b),
    }
}

/// Get a field from a record using dot notation
pub(crate) fn get_field<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = record.get(parts.next()?)?;

    for part in parts {
        current = current.as_object()?.get(part)?;
    }

    Some(current)
}

fn value_equals(value: &Value, expected: &str) -> bool {
    match value {
        Value::String(s) => s == expected,
        Value::Number(n) => n.to_string() == expected,
        Value::Bool(b) => (expected == "true" && *b) || (expected == "false" && !*b),
        Value::Null => expected == "null",
        _ => false,
    }
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_test<F>(field: Option<&Value>, expected: Option<&str>, test: F) -> bool
where
    F: Fn(&str, &str) -> bool,
{
    match (field.and_then(value_as_string), expected) {
        (Some(s), Some(v)) => test(&s, v),
        _ => false,
    }
}

fn numeric_compare<F>(field: Option<&Value>, expected: Option<&str>, cmp: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    let field_num = field.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    });
    let expected_num = expected.and_then(|s| s.parse::<f64>().ok());

    match (field_num, expected_num) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}
