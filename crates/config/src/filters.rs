//! Filter configuration
//!
//! Named filter instances. Everything besides `type`, `plugin_id` and
//! `enabled` is handed to the filter factory as options.
//!
//! ```toml
//! [filters.scrub]
//! type = "redact"
//! plugin_id = "scrub_pii"
//! fields = ["password"]
//! ```

use std::collections::HashMap;

use serde::Deserialize;

/// Filter types the binary knows how to build
pub const KNOWN_FILTER_TYPES: &[&str] = &["noop", "grep", "redact", "time_key", "sample"];

/// Check if a filter type is known
pub fn is_known_filter_type(filter_type: &str) -> bool {
    KNOWN_FILTER_TYPES.contains(&filter_type)
}

/// All configured filters, keyed by name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FiltersConfig {
    filters: HashMap<String, FilterConfig>,
}

impl FiltersConfig {
    /// Get a filter by name
    pub fn get(&self, name: &str) -> Option<&FilterConfig> {
        self.filters.get(name)
    }

    /// Check if a filter is declared
    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Iterate over all filters
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterConfig)> {
        self.filters.iter()
    }

    /// Get all filter names
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.filters.keys()
    }

    /// Get the number of declared filters
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if no filters are declared
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Configuration for a single filter instance
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Filter type (e.g., "grep", "redact")
    #[serde(rename = "type")]
    pub filter_type: String,

    /// Metrics scope and log label
    #[serde(default)]
    pub plugin_id: Option<String>,

    /// Disabled filters are left out of every route (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Type-specific options passed to the filter factory
    #[serde(flatten)]
    pub options: toml::Table,
}

fn default_true() -> bool {
    true
}

impl FilterConfig {
    /// Get an option as string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|v| v.as_str())
    }

    /// Get an option as i64
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.options.get(key).and_then(|v| v.as_integer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_options() {
        let toml = r#"
[drop_debug]
type = "grep"
field = "level"
value = "debug"

[every_tenth]
type = "sample"
plugin_id = "sampler"
every = 10
enabled = false
"#;
        let filters: FiltersConfig = toml::from_str(toml).unwrap();
        assert_eq!(filters.len(), 2);

        let grep = filters.get("drop_debug").unwrap();
        assert_eq!(grep.filter_type, "grep");
        assert!(grep.enabled);
        assert_eq!(grep.get_str("field"), Some("level"));
        assert!(!grep.options.contains_key("type"));

        let sample = filters.get("every_tenth").unwrap();
        assert_eq!(sample.plugin_id.as_deref(), Some("sampler"));
        assert!(!sample.enabled);
        assert_eq!(sample.get_int("every"), Some(10));
        assert!(!sample.options.contains_key("plugin_id"));
    }

    #[test]
    fn test_known_filter_types() {
        assert!(is_known_filter_type("redact"));
        assert!(is_known_filter_type("time_key"));
        assert!(!is_known_filter_type("exec"));
    }

    #[test]
    fn test_missing_type_rejected() {
        assert!(toml::from_str::<FiltersConfig>("[f]\nfield = \"x\"").is_err());
    }
}
