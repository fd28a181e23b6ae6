//! Filter Registry - Dynamic filter creation
//!
//! The registry maps filter type names to factories, enabling
//! configuration-driven filter instantiation.
//!
//! # Example
//!
//! ```
//! use ripple_transform::{FilterOptions, default_registry};
//!
//! let registry = default_registry();
//! let filter = registry.create("noop", &FilterOptions::new()).unwrap();
//! assert_eq!(filter.name(), "noop");
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::grep::GrepFactory;
use crate::noop::NoopFactory;
use crate::redact::RedactFactory;
use crate::sample::SampleFactory;
use crate::time_key::TimeKeyFactory;
use crate::{Filter, TransformError, TransformResult};

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;

/// Options passed to filter factories
///
/// The filter's TOML table minus the keys the config layer consumes
/// (`type`, `plugin_id`).
pub type FilterOptions = toml::Table;

/// Filter types known to [`default_registry`]
pub const KNOWN_FILTER_TYPES: &[&str] = &["noop", "grep", "redact", "time_key", "sample"];

/// Factory trait for creating filters
pub trait FilterFactory: Send + Sync {
    /// Create a filter instance from options
    ///
    /// # Errors
    /// Returns `TransformError::Config` if options are invalid
    fn create(&self, options: &FilterOptions) -> TransformResult<Arc<dyn Filter>>;

    /// Human-readable name for this factory (for error messages)
    fn name(&self) -> &'static str;

    /// Default options for this filter type
    fn default_options(&self) -> Option<FilterOptions> {
        None
    }
}

/// Registry for filter factories
pub struct FilterRegistry {
    factories: HashMap<String, Box<dyn FilterFactory>>,
}

impl FilterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a filter factory
    ///
    /// Returns `false` if a factory is already registered with this name;
    /// the existing factory is kept.
    pub fn register<F: FilterFactory + 'static>(&mut self, type_name: &str, factory: F) -> bool {
        if self.factories.contains_key(type_name) {
            return false;
        }
        self.factories.insert(type_name.to_string(), Box::new(factory));
        true
    }

    /// Create a filter from its type name and options
    ///
    /// # Errors
    /// - `TransformError::Config` if the type is not registered
    /// - `TransformError::Config` if the factory rejects the options
    pub fn create(&self, type_name: &str, options: &FilterOptions) -> TransformResult<Arc<dyn Filter>> {
        let factory = self.factories.get(type_name).ok_or_else(|| {
            let mut available = self.available_types();
            available.sort_unstable();
            TransformError::config(format!(
                "unknown filter type '{}', available: [{}]",
                type_name,
                available.join(", ")
            ))
        })?;

        factory.create(options)
    }

    /// Check if a filter type is registered
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Get list of registered filter types
    pub fn available_types(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Get default options for a filter type
    pub fn default_options(&self, type_name: &str) -> Option<FilterOptions> {
        self.factories.get(type_name).and_then(|f| f.default_options())
    }

    /// Get the number of registered factories
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a registry with all built-in filters registered
pub fn default_registry() -> FilterRegistry {
    let mut registry = FilterRegistry::new();
    registry.register("noop", NoopFactory);
    registry.register("grep", GrepFactory);
    registry.register("redact", RedactFactory);
    registry.register("time_key", TimeKeyFactory);
    registry.register("sample", SampleFactory);
    registry
}
