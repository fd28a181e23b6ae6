//! Noop Filter - Pass-through filter
//!
//! Keeps every record unchanged. Useful for exercising rule and pipeline
//! wiring, and for measuring chain overhead.

use std::sync::Arc;

use crate::registry::{FilterFactory, FilterOptions};
use crate::{Filter, TransformResult};

/// A filter that keeps every record unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFilter;

impl NoopFilter {
    /// Create a new noop filter
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}

impl Filter for NoopFilter {
    fn name(&self) -> &'static str {
        "noop"
    }
}

/// Factory for NoopFilter
///
/// This is built-in and always available.
#[derive(Debug, Clone, Copy)]
pub struct NoopFactory;

impl FilterFactory for NoopFactory {
    fn create(&self, _options: &FilterOptions) -> TransformResult<Arc<dyn Filter>> {
        Ok(Arc::new(NoopFilter::new()))
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
