//! Filter contract
//!
//! A filter rewrites or drops records on their way to an output. Filters
//! implement one of three transforms:
//!
//! | Transform | Capability flag | Sees |
//! |-----------|-----------------|------|
//! | `filter` | (default) | one record |
//! | `filter_with_time` | `has_filter_with_time` | one record and its time |
//! | `filter_stream` | `has_filter_stream` | the whole batch |
//!
//! Capabilities are read once, when the filter is wrapped in a [`FilterRef`],
//! so a chain can pick its execution strategy without calling into filters.

use std::fmt;
use std::sync::Arc;

use ripple_protocol::{EventBatch, EventTime, Record};

use crate::{TransformError, TransformResult};

/// Outcome of a per-record transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Pass the (possibly rewritten) record on
    Keep,
    /// Drop the record; later filters do not see it
    Drop,
}

/// Receives records that a filter failed on
///
/// Implementations must not fail or panic.
pub trait ErrorEventSink: Send + Sync {
    /// Report a record that could not be filtered
    fn emit_error_event(&self, tag: &str, time: EventTime, record: &Record, error: &TransformError);
}

/// Record filter
///
/// Implementors must be `Send + Sync`; a filter is shared by every pipeline
/// whose tag it matches and may be called concurrently.
///
/// # Example
///
/// ```
/// use ripple_protocol::{EventTime, Record};
/// use ripple_transform::{Filter, TransformResult, Verdict};
///
/// struct DropEmpty;
///
/// impl Filter for DropEmpty {
///     fn name(&self) -> &'static str {
///         "drop_empty"
///     }
///
///     fn filter(&self, _tag: &str, _time: EventTime, record: &mut Record) -> TransformResult<Verdict> {
///         Ok(if record.is_empty() { Verdict::Drop } else { Verdict::Keep })
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Name of this filter for logging
    fn name(&self) -> &'static str;

    /// Rewrite `record` in place or drop it
    fn filter(&self, _tag: &str, _time: EventTime, _record: &mut Record) -> TransformResult<Verdict> {
        Ok(Verdict::Keep)
    }

    /// Whether [`Filter::filter_with_time`] replaces [`Filter::filter`]
    fn has_filter_with_time(&self) -> bool {
        false
    }

    /// Rewrite the record and its time in place, or drop it
    fn filter_with_time(
        &self,
        tag: &str,
        time: &mut EventTime,
        record: &mut Record,
    ) -> TransformResult<Verdict> {
        self.filter(tag, *time, record)
    }

    /// Whether [`Filter::filter_stream`] is overridden
    ///
    /// A filter that overrides the bulk transform must keep its per-record
    /// transform equivalent: chains of one filter always run per record.
    fn has_filter_stream(&self) -> bool {
        false
    }

    /// Transform a whole batch
    ///
    /// The default runs the per-record transform over every event. Records
    /// that fail are reported to `errors` and left out of the result.
    fn filter_stream(
        &self,
        tag: &str,
        batch: &EventBatch,
        errors: &dyn ErrorEventSink,
    ) -> TransformResult<EventBatch> {
        let with_time = self.has_filter_with_time();
        let mut out = EventBatch::with_capacity(batch.len());

        for (time, record) in batch.iter() {
            let mut new_time = time;
            let mut new_record = record.clone();
            match apply(self, with_time, tag, &mut new_time, &mut new_record) {
                Ok(Verdict::Keep) => out.add(new_time, new_record),
                Ok(Verdict::Drop) => {}
                Err(e) => errors.emit_error_event(tag, time, record, &e),
            }
        }

        Ok(out)
    }
}

fn apply<F: Filter + ?Sized>(
    filter: &F,
    with_time: bool,
    tag: &str,
    time: &mut EventTime,
    record: &mut Record,
) -> TransformResult<Verdict> {
    if with_time {
        filter.filter_with_time(tag, time, record)
    } else {
        filter.filter(tag, *time, record)
    }
}

/// Capability flags of a filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCaps {
    /// Uses the time-aware per-record transform
    pub with_time: bool,
    /// Overrides the bulk transform
    pub bulk: bool,
}

impl FilterCaps {
    /// Read the capability flags of a filter
    pub fn of(filter: &dyn Filter) -> Self {
        Self {
            with_time: filter.has_filter_with_time(),
            bulk: filter.has_filter_stream(),
        }
    }
}

/// Shared handle to a filter with its capabilities resolved
#[derive(Clone)]
pub struct FilterRef {
    filter: Arc<dyn Filter>,
    caps: FilterCaps,
    plugin_id: Option<Arc<str>>,
}

impl FilterRef {
    /// Wrap a filter, reading its capability flags
    pub fn new(filter: Arc<dyn Filter>) -> Self {
        let caps = FilterCaps::of(filter.as_ref());
        Self {
            filter,
            caps,
            plugin_id: None,
        }
    }

    /// Attach a configured plugin id
    pub fn with_plugin_id(mut self, id: impl Into<Arc<str>>) -> Self {
        self.plugin_id = Some(id.into());
        self
    }

    /// Filter name
    #[inline]
    pub fn name(&self) -> &'static str {
        self.filter.name()
    }

    /// Configured plugin id, if any
    #[inline]
    pub fn plugin_id(&self) -> Option<&str> {
        self.plugin_id.as_deref()
    }

    /// Resolved capability flags
    #[inline]
    pub fn caps(&self) -> FilterCaps {
        self.caps
    }

    /// Underlying filter
    #[inline]
    pub fn filter(&self) -> &dyn Filter {
        self.filter.as_ref()
    }

    /// Run the per-record transform matching the filter's capabilities
    #[inline]
    pub fn apply(&self, tag: &str, time: &mut EventTime, record: &mut Record) -> TransformResult<Verdict> {
        apply(self.filter.as_ref(), self.caps.with_time, tag, time, record)
    }

    /// Run the bulk transform
    #[inline]
    pub fn filter_stream(
        &self,
        tag: &str,
        batch: &EventBatch,
        errors: &dyn ErrorEventSink,
    ) -> TransformResult<EventBatch> {
        self.filter.filter_stream(tag, batch, errors)
    }
}

impl fmt::Debug for FilterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRef")
            .field("name", &self.name())
            .field("caps", &self.caps)
            .field("plugin_id", &self.plugin_id)
            .finish()
    }
}
