//! EventBatch - Ordered events flowing through the router
//!
//! A batch is an ordered list of `(EventTime, Record)` pairs for one tag.
//! Three shapes exist so callers can hand over what they already have without
//! reshaping it; consumers only see `len`, `iter` and the wire codec.
//!
//! # Wire Format
//!
//! Every shape encodes identically with `bincode`: a length-prefixed sequence
//! of `(EventTime, Record)` entries. The encoded size is what the router
//! reports as routed bytes.

use serde::{Serialize, Serializer};

use crate::{EventTime, Record, Result};

/// A single `(time, record)` pair
pub type Entry = (EventTime, Record);

/// Ordered events for one tag
#[derive(Debug, Clone, PartialEq)]
pub enum EventBatch {
    /// Exactly one event
    One(EventTime, Record),

    /// Pre-built array of events
    Array(Vec<Entry>),

    /// Growable batch assembled with [`EventBatch::add`]
    Multi(Vec<Entry>),
}

impl EventBatch {
    /// Batch holding a single event
    #[inline]
    pub fn one(time: EventTime, record: Record) -> Self {
        Self::One(time, record)
    }

    /// Batch wrapping an existing entry list
    #[inline]
    pub fn array(entries: Vec<Entry>) -> Self {
        Self::Array(entries)
    }

    /// Empty growable batch
    #[inline]
    pub fn multi() -> Self {
        Self::Multi(Vec::new())
    }

    /// Empty growable batch with preallocated room
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::Multi(Vec::with_capacity(capacity))
    }

    /// Append an event
    ///
    /// `One` and `Array` batches become `Multi` on first append.
    pub fn add(&mut self, time: EventTime, record: Record) {
        match self {
            Self::Multi(entries) => entries.push((time, record)),
            _ => {
                let mut entries = std::mem::take(self).into_entries();
                entries.push((time, record));
                *self = Self::Multi(entries);
            }
        }
    }

    /// Number of events
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::One(..) => 1,
            Self::Array(entries) | Self::Multi(entries) => entries.len(),
        }
    }

    /// True when the batch holds no events
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate events in order without copying records
    pub fn iter(&self) -> Iter<'_> {
        match self {
            Self::One(time, record) => Iter::One(Some((*time, record))),
            Self::Array(entries) | Self::Multi(entries) => Iter::Slice(entries.iter()),
        }
    }

    /// Whether the batch can be iterated more than once
    ///
    /// Always true: batches are owned buffers lent out by reference.
    #[inline]
    pub fn is_repeatable(&self) -> bool {
        true
    }

    /// Consume the batch into its entries
    pub fn into_entries(self) -> Vec<Entry> {
        match self {
            Self::One(time, record) => vec![(time, record)],
            Self::Array(entries) | Self::Multi(entries) => entries,
        }
    }

    /// Encode with the wire codec
    pub fn to_wire(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Byte length of [`EventBatch::to_wire`] without allocating the buffer
    pub fn encoded_size(&self) -> Result<u64> {
        Ok(bincode::serialized_size(self)?)
    }
}

impl Default for EventBatch {
    fn default() -> Self {
        Self::multi()
    }
}

impl FromIterator<Entry> for EventBatch {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self::Multi(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EventBatch {
    type Item = (EventTime, &'a Record);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for EventBatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Iterator over the events of a batch
#[derive(Debug, Clone)]
pub enum Iter<'a> {
    #[doc(hidden)]
    One(Option<(EventTime, &'a Record)>),
    #[doc(hidden)]
    Slice(std::slice::Iter<'a, Entry>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = (EventTime, &'a Record);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::One(slot) => slot.take(),
            Self::Slice(inner) => inner.next().map(|(time, record)| (*time, record)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = match self {
            Self::One(slot) => usize::from(slot.is_some()),
            Self::Slice(inner) => inner.len(),
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter<'_> {}
