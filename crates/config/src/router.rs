//! Router configuration

use serde::Deserialize;

/// Default match cache capacity
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Router settings
///
/// ```toml
/// [router]
/// default = "stdout"
/// cache_capacity = 4096
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Output receiving tags no rule matches, and filter-only routes.
    /// When unset, a built-in null output discards them with a warning
    /// per tag.
    pub default: Option<String>,

    /// Match cache capacity (distinct tags remembered)
    pub cache_capacity: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config.default, None);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn test_deserialize() {
        let config: RouterConfig = toml::from_str("default = \"stdout\"\ncache_capacity = 8").unwrap();
        assert_eq!(config.default.as_deref(), Some("stdout"));
        assert_eq!(config.cache_capacity, 8);
    }
}
