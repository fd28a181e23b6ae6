//! Pipeline - Filter chain terminated by one output
//!
//! Built by the router the first time a tag resolves through at least one
//! filter rule, then cached and shared. Construction happens under `&mut`;
//! once wrapped in a route the pipeline is read-only.

use std::fmt;
use std::sync::Arc;

use ripple_protocol::EventBatch;
use ripple_sinks::Output;
use ripple_transform::{ErrorEventSink, FilterChain, FilterRef};

use crate::{EmitError, Result};

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;

/// Filters in rule order, then an output
pub struct Pipeline {
    chain: FilterChain,
    output: Option<Arc<dyn Output>>,
    errors: Arc<dyn ErrorEventSink>,
}

impl Pipeline {
    /// Create an empty pipeline reporting record errors to `errors`
    pub fn new(errors: Arc<dyn ErrorEventSink>) -> Self {
        Self {
            chain: FilterChain::empty(),
            output: None,
            errors,
        }
    }

    /// Append a filter
    pub fn add_filter(&mut self, filter: FilterRef) {
        self.chain.push(filter);
    }

    /// Attach the terminal output
    pub fn set_output(&mut self, output: Arc<dyn Output>) {
        self.output = Some(output);
    }

    /// Filter chain
    #[inline]
    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    /// Terminal output, once set
    #[inline]
    pub fn output(&self) -> Option<&Arc<dyn Output>> {
        self.output.as_ref()
    }

    /// Filter a batch and hand the survivors to the output
    ///
    /// Records dropped by filters do not reach the output; an empty result is
    /// still delivered. Output errors are returned, not reported.
    pub fn emit_events(&self, tag: &str, batch: &EventBatch) -> Result<()> {
        let output = self.output.as_ref().ok_or(EmitError::NoOutput)?;
        let processed = self.chain.filter_stream(tag, batch, self.errors.as_ref())?;
        output.emit_events(tag, &processed)?;
        Ok(())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("filters", &self.chain.names())
            .field("output", &self.output.as_ref().map(|o| o.name()))
            .finish()
    }
}
