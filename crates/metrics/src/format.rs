//! Counter report formatters
//!
//! # Example Output
//!
//! ```text
//! [metrics] out_stdout: route_count=1.2K (+300) route_size=45.3 KB (+1.0 KB)
//! {"scope":"out_stdout","interval_secs":10,"counters":{"route_count":1200,...},"delta":{...}}
//! ```

use std::collections::BTreeMap;

/// Trait for counter report formatters
pub trait MetricsFormatter: Send + Sync {
    /// Format one scope's counters; `delta` holds growth since the last report
    fn format_scope(
        &self,
        scope: &str,
        counters: &BTreeMap<String, u64>,
        delta: Option<&BTreeMap<String, u64>>,
        interval_secs: u64,
    ) -> String;
}

/// Counter name with the `<scope>_` prefix removed
pub fn short_name<'a>(scope: &str, counter: &'a str) -> &'a str {
    counter
        .strip_prefix(scope)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(counter)
}

/// Human-readable formatter
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsFormatter for HumanFormatter {
    fn format_scope(
        &self,
        scope: &str,
        counters: &BTreeMap<String, u64>,
        delta: Option<&BTreeMap<String, u64>>,
        _interval_secs: u64,
    ) -> String {
        let mut out = format!("[metrics] {scope}:");
        for (name, value) in counters {
            let short = short_name(scope, name);
            let render = |v: u64| {
                if short.ends_with("_size") {
                    format_bytes(v)
                } else {
                    format_count(v)
                }
            };
            out.push_str(&format!(" {short}={}", render(*value)));
            if let Some(d) = delta.and_then(|d| d.get(name)) {
                out.push_str(&format!(" (+{})", render(*d)));
            }
        }
        out
    }
}

/// JSON formatter, one object per scope
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsFormatter for JsonFormatter {
    fn format_scope(
        &self,
        scope: &str,
        counters: &BTreeMap<String, u64>,
        delta: Option<&BTreeMap<String, u64>>,
        interval_secs: u64,
    ) -> String {
        let strip = |map: &BTreeMap<String, u64>| -> serde_json::Map<String, serde_json::Value> {
            map.iter()
                .map(|(k, v)| (short_name(scope, k).to_string(), serde_json::Value::from(*v)))
                .collect()
        };

        let mut obj = serde_json::Map::new();
        obj.insert("scope".into(), scope.into());
        obj.insert("interval_secs".into(), interval_secs.into());
        obj.insert("counters".into(), strip(counters).into());
        if let Some(delta) = delta {
            obj.insert("delta".into(), strip(delta).into());
        }
        serde_json::Value::Object(obj).to_string()
    }
}

/// Format bytes in human-readable form (KB, MB, GB)
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format count with K/M suffix for readability
pub fn format_count(count: u64) -> String {
    const K: u64 = 1000;
    const M: u64 = 1_000_000;

    if count >= M {
        format!("{:.1}M", count as f64 / M as f64)
    } else if count >= K {
        format!("{:.1}K", count as f64 / K as f64)
    } else {
        count.to_string()
    }
}
