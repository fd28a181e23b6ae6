//! Counter backend trait and the values passed through it

use std::collections::BTreeMap;

use crate::Result;

/// Counter semantics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CounterKind {
    /// Monotonic unsigned sum
    #[default]
    Numeric,
}

/// A counter a scope declares at init
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterDescriptor {
    pub name: String,
    pub kind: CounterKind,
}

impl CounterDescriptor {
    /// Numeric counter descriptor
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CounterKind::Numeric,
        }
    }
}

/// An amount to add to one counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterIncrement {
    pub name: String,
    pub value: u64,
}

impl CounterIncrement {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Where routed-record counters go
///
/// Implementations are shared across emitting threads.
pub trait CounterBackend: Send + Sync {
    /// Declare the counters of `scope`
    ///
    /// Re-initializing a scope keeps existing values and adds new counters.
    fn init(&self, scope: &str, counters: &[CounterDescriptor]) -> Result<()>;

    /// Add to counters of an initialized scope
    fn inc(&self, scope: &str, increments: &[CounterIncrement]) -> Result<()>;

    /// Stop accepting updates
    fn stop(&self) -> Result<()>;

    /// Current values, if the backend can read them back
    fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot::default()
    }
}

/// Point-in-time counter values, by scope then counter name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    scopes: BTreeMap<String, BTreeMap<String, u64>>,
}

impl CounterSnapshot {
    /// Record a value
    pub fn insert(&mut self, scope: &str, counter: &str, value: u64) {
        self.scopes
            .entry(scope.to_string())
            .or_default()
            .insert(counter.to_string(), value);
    }

    /// Value of one counter
    pub fn get(&self, scope: &str, counter: &str) -> Option<u64> {
        self.scopes.get(scope)?.get(counter).copied()
    }

    /// Counters of one scope
    pub fn scope(&self, scope: &str) -> Option<&BTreeMap<String, u64>> {
        self.scopes.get(scope)
    }

    /// Iterate scopes in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, u64>)> {
        self.scopes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Growth since `previous`; counters missing there count from zero
    pub fn since(&self, previous: &CounterSnapshot) -> CounterSnapshot {
        let mut delta = CounterSnapshot::default();
        for (scope, counters) in &self.scopes {
            for (name, value) in counters {
                let before = previous.get(scope, name).unwrap_or(0);
                delta.insert(scope, name, value.saturating_sub(before));
            }
        }
        delta
    }
}
