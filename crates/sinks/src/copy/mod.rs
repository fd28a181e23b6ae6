//! Copy Output - Fan a batch out to several stores
//!
//! Every store receives the same batch, in store order. By default the
//! stores share one batch by reference; `deep_copy` hands each store its
//! own clone so a store cannot observe what another did to its records.
//!
//! The first failing store stops the fan-out and its error is returned,
//! wrapped with the store's position. Stores before it have already
//! written.
//!
//! ```toml
//! [outputs.fan]
//! type = "copy"
//! stores = ["stdout", "archive"]
//! deep_copy = false
//! ```

use std::sync::Arc;

use ripple_protocol::EventBatch;

use crate::{Output, Result, SinkError, SinkMetrics};

#[cfg(test)]
#[path = "copy_test.rs"]
mod copy_test;

/// Output forwarding each batch to a list of stores
#[derive(Debug)]
pub struct CopyOutput {
    stores: Vec<Arc<dyn Output>>,
    deep_copy: bool,
    plugin_id: Option<String>,
    metrics: SinkMetrics,
}

impl CopyOutput {
    /// Create a copy output over `stores`
    ///
    /// # Errors
    /// Returns `SinkError::Config` if `stores` is empty
    pub fn new(stores: Vec<Arc<dyn Output>>) -> Result<Self> {
        if stores.is_empty() {
            return Err(SinkError::config("copy output needs at least one store"));
        }
        Ok(Self {
            stores,
            deep_copy: false,
            plugin_id: None,
            metrics: SinkMetrics::new(),
        })
    }

    /// Give each store its own clone of the batch
    pub fn with_deep_copy(mut self, deep_copy: bool) -> Self {
        self.deep_copy = deep_copy;
        self
    }

    /// Set the plugin id
    pub fn with_plugin_id(mut self, id: impl Into<String>) -> Self {
        self.plugin_id = Some(id.into());
        self
    }

    /// The stores, in fan-out order
    pub fn stores(&self) -> &[Arc<dyn Output>] {
        &self.stores
    }

    /// Get reference to metrics
    #[inline]
    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }
}

impl Output for CopyOutput {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn plugin_id(&self) -> Option<&str> {
        self.plugin_id.as_deref()
    }

    fn emit_events(&self, tag: &str, batch: &EventBatch) -> Result<()> {
        self.metrics.batch_received();

        for (index, store) in self.stores.iter().enumerate() {
            let result = if self.deep_copy {
                store.emit_events(tag, &batch.clone())
            } else {
                store.emit_events(tag, batch)
            };

            if let Err(e) = result {
                self.metrics.write_error();
                return Err(SinkError::store(index, store.name(), e));
            }
        }

        self.metrics.delivered(batch, 0);
        Ok(())
    }
}
