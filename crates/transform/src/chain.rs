//! Filter Chain - Ordered filters with a selected execution strategy
//!
//! # Design
//!
//! - **Per-record** (fast path): one pass over the batch; each record is
//!   folded through every filter. A dropped record skips the rest of the
//!   chain; a failing filter reports the record once and drops it.
//! - **Staged** (fallback): the batch is threaded through each filter's bulk
//!   transform in turn. Errors propagate to the caller.
//!
//! A chain runs per record when no filter overrides the bulk transform, or
//! when it holds exactly one filter. The choice is computed on first use and
//! reset whenever a filter is added.

use std::borrow::Cow;
use std::sync::OnceLock;

use ripple_protocol::{EventBatch, EventTime, Record};

use crate::{ErrorEventSink, FilterRef, TransformResult, Verdict};

#[cfg(test)]
#[path = "chain_test.rs"]
mod tests;

/// How a chain processes batches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Single pass, record by record
    PerRecord,
    /// Batch threaded through each filter's bulk transform
    Staged,
}

/// Result of folding one record through the chain
#[derive(Debug)]
enum RecordOutcome {
    Kept(EventTime, Record),
    Dropped,
    Errored,
}

/// Ordered filters applied to every batch of a pipeline
#[derive(Debug, Default)]
pub struct FilterChain {
    filters: Vec<FilterRef>,
    mode: OnceLock<ExecutionMode>,
}

impl FilterChain {
    /// Create a chain from filters in application order
    pub fn new(filters: Vec<FilterRef>) -> Self {
        Self {
            filters,
            mode: OnceLock::new(),
        }
    }

    /// Create an empty chain (pass-through)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a filter and forget the selected execution mode
    pub fn push(&mut self, filter: FilterRef) {
        self.filters.push(filter);
        self.mode = OnceLock::new();
    }

    /// Get the number of filters
    #[inline]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if the chain is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filters in application order
    pub fn filters(&self) -> &[FilterRef] {
        &self.filters
    }

    /// Get the names of all filters
    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(FilterRef::name).collect()
    }

    /// Get a filter by name
    pub fn get(&self, name: &str) -> Option<&FilterRef> {
        self.filters.iter().find(|f| f.name() == name)
    }

    /// Execution mode, selected on first call
    pub fn mode(&self) -> ExecutionMode {
        *self.mode.get_or_init(|| self.select_mode())
    }

    fn select_mode(&self) -> ExecutionMode {
        let bulk: Vec<&'static str> = self
            .filters
            .iter()
            .filter(|f| f.caps().bulk)
            .map(FilterRef::name)
            .collect();

        if bulk.is_empty() || self.filters.len() == 1 {
            return ExecutionMode::PerRecord;
        }

        tracing::info!(
            bulk_filters = ?bulk,
            chain = ?self.names(),
            "filter chain contains bulk filters, running stage by stage"
        );
        ExecutionMode::Staged
    }

    /// Run a batch through the chain
    ///
    /// An empty chain borrows the input unchanged.
    pub fn filter_stream<'a>(
        &self,
        tag: &str,
        batch: &'a EventBatch,
        errors: &dyn ErrorEventSink,
    ) -> TransformResult<Cow<'a, EventBatch>> {
        if self.filters.is_empty() {
            return Ok(Cow::Borrowed(batch));
        }

        match self.mode() {
            ExecutionMode::PerRecord => Ok(Cow::Owned(self.per_record(tag, batch, errors))),
            ExecutionMode::Staged => self.staged(tag, batch, errors),
        }
    }

    fn per_record(&self, tag: &str, batch: &EventBatch, errors: &dyn ErrorEventSink) -> EventBatch {
        let mut out = EventBatch::with_capacity(batch.len());

        for (time, record) in batch.iter() {
            match self.fold_record(tag, time, record.clone(), errors) {
                RecordOutcome::Kept(time, record) => out.add(time, record),
                RecordOutcome::Dropped | RecordOutcome::Errored => {}
            }
        }

        out
    }

    fn fold_record(
        &self,
        tag: &str,
        mut time: EventTime,
        mut record: Record,
        errors: &dyn ErrorEventSink,
    ) -> RecordOutcome {
        for filter in &self.filters {
            match filter.apply(tag, &mut time, &mut record) {
                Ok(Verdict::Keep) => {}
                Ok(Verdict::Drop) => return RecordOutcome::Dropped,
                Err(e) => {
                    errors.emit_error_event(tag, time, &record, &e);
                    return RecordOutcome::Errored;
                }
            }
        }
        RecordOutcome::Kept(time, record)
    }

    fn staged<'a>(
        &self,
        tag: &str,
        batch: &'a EventBatch,
        errors: &dyn ErrorEventSink,
    ) -> TransformResult<Cow<'a, EventBatch>> {
        let mut current = Cow::Borrowed(batch);
        for filter in &self.filters {
            current = Cow::Owned(filter.filter_stream(tag, &current, errors)?);
        }
        Ok(current)
    }
}
