//! Collectors and routes
//!
//! A [`Collector`] is what a rule points at: a filter or an output. A
//! [`Route`] is what the router resolves a tag to: an output, or a pipeline
//! of filters ending in an output.

use std::fmt;
use std::sync::Arc;

use ripple_protocol::EventBatch;
use ripple_sinks::Output;
use ripple_transform::FilterRef;

use crate::{Pipeline, Result};

/// Metric scope of collectors without a configured plugin id
pub const ANONYMOUS_SCOPE: &str = "anonymous";

/// Metric scope of an output
#[inline]
pub fn output_scope(output: &dyn Output) -> &str {
    output.plugin_id().unwrap_or(ANONYMOUS_SCOPE)
}

/// Target of a routing rule
#[derive(Debug, Clone)]
pub enum Collector {
    /// Joins the pipeline of every tag it matches; resolution continues
    Filter(FilterRef),
    /// Terminates resolution
    Output(Arc<dyn Output>),
}

impl Collector {
    /// Plugin type name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Filter(f) => f.name(),
            Self::Output(o) => o.name(),
        }
    }

    /// Configured plugin id, if any
    pub fn plugin_id(&self) -> Option<&str> {
        match self {
            Self::Filter(f) => f.plugin_id(),
            Self::Output(o) => o.plugin_id(),
        }
    }

    /// Metric scope: the plugin id, or [`ANONYMOUS_SCOPE`]
    pub fn scope(&self) -> &str {
        self.plugin_id().unwrap_or(ANONYMOUS_SCOPE)
    }

    /// True for filter collectors
    #[inline]
    pub fn is_filter(&self) -> bool {
        matches!(self, Self::Filter(_))
    }
}

impl From<FilterRef> for Collector {
    fn from(filter: FilterRef) -> Self {
        Self::Filter(filter)
    }
}

impl From<Arc<dyn Output>> for Collector {
    fn from(output: Arc<dyn Output>) -> Self {
        Self::Output(output)
    }
}

impl fmt::Display for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_plugin(f, self.name(), self.plugin_id())
    }
}

/// Resolved destination of a tag
///
/// Cloning is cheap; both variants are reference counted.
#[derive(Debug, Clone)]
pub enum Route {
    /// Straight to an output
    Output(Arc<dyn Output>),
    /// Through filters, then to the pipeline's output
    Pipeline(Arc<Pipeline>),
}

impl Route {
    /// Deliver a batch along the route
    pub fn emit_events(&self, tag: &str, batch: &EventBatch) -> Result<()> {
        match self {
            Self::Output(output) => Ok(output.emit_events(tag, batch)?),
            Self::Pipeline(pipeline) => pipeline.emit_events(tag, batch),
        }
    }

    /// Output that ends the route
    pub fn output(&self) -> Option<&Arc<dyn Output>> {
        match self {
            Self::Output(output) => Some(output),
            Self::Pipeline(pipeline) => pipeline.output(),
        }
    }

    /// Pipeline, if the route has filters
    pub fn pipeline(&self) -> Option<&Pipeline> {
        match self {
            Self::Output(_) => None,
            Self::Pipeline(pipeline) => Some(pipeline),
        }
    }

    /// Metric scope: that of the terminal output
    pub fn scope(&self) -> &str {
        self.output()
            .map_or(ANONYMOUS_SCOPE, |output| output_scope(output.as_ref()))
    }

    /// True when both routes are the same allocation
    pub fn ptr_eq(&self, other: &Route) -> bool {
        match (self, other) {
            (Self::Output(a), Self::Output(b)) => Arc::ptr_eq(a, b),
            (Self::Pipeline(a), Self::Pipeline(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// `grep -> redact(scrub) -> stdout(console)`
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Self::Pipeline(pipeline) = self {
            for filter in pipeline.chain().filters() {
                write_plugin(f, filter.name(), filter.plugin_id())?;
                f.write_str(" -> ")?;
            }
        }
        match self.output() {
            Some(output) => write_plugin(f, output.name(), output.plugin_id()),
            None => f.write_str("(none)"),
        }
    }
}

fn write_plugin(f: &mut fmt::Formatter<'_>, name: &str, plugin_id: Option<&str>) -> fmt::Result {
    match plugin_id {
        Some(id) => write!(f, "{name}({id})"),
        None => f.write_str(name),
    }
}
